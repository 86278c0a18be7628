//! Lookup tables that replace geometric overlap tests during transitions.
//!
//! Everything here is computed once when a puzzle is loaded. A transition then only
//! needs set membership tests against anchor positions and relative offsets.

use std::fmt::{self, Display, Formatter};

use fnv::FnvHashSet;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use crate::data::{Action, Point, ACTIONS, AGENT_INDEX};
use crate::shape::{overlap, Shape};

/// Collision tables for a single direction of movement.
#[derive(Debug, Clone)]
pub struct ActionCollisions {
    /// Agent anchors from which this move hits a wall or an agent wall.
    agent: FnvHashSet<Point>,
    /// Per movable, anchors from which this move hits a wall. Empty for the agent.
    walls: Vec<FnvHashSet<Point>>,
    /// `[pusher][pushee]`: values of `pusher.anchor - pushee.anchor`
    /// at which this move of the pusher pushes the pushee. Empty for pushee 0.
    pushes: Vec<Vec<FnvHashSet<Point>>>,
}

impl ActionCollisions {
    fn build(
        action: Action,
        movables: &[&Shape],
        walls: &Shape,
        agent_obstacles: &Shape,
        dimensions: Point,
    ) -> Self {
        let n = movables.len();

        let agent = static_collisions(movables[AGENT_INDEX], agent_obstacles, action, dimensions);

        let mut wall_maps = vec![FnvHashSet::default(); n];
        for m in 1..n {
            wall_maps[m] = static_collisions(movables[m], walls, action, dimensions);
        }

        // nothing pushes the agent, the agent is the cause of all movement
        let mut pushes = vec![vec![FnvHashSet::default(); n]; n];
        for pusher in 0..n {
            for pushee in 1..n {
                if pusher != pushee {
                    pushes[pusher][pushee] =
                        push_contacts(movables[pusher], movables[pushee], action);
                }
            }
        }

        ActionCollisions {
            agent,
            walls: wall_maps,
            pushes,
        }
    }

    pub fn is_agent_blocked(&self, agent_pos: Point) -> bool {
        self.agent.contains(&agent_pos)
    }

    pub fn is_wall_blocked(&self, movable: usize, pos: Point) -> bool {
        self.walls[movable].contains(&pos)
    }

    /// Whether moving `pusher` pushes `pushee` when `offset == pusher.anchor - pushee.anchor`.
    pub fn pushes(&self, pusher: usize, pushee: usize, offset: Point) -> bool {
        self.pushes[pusher][pushee].contains(&offset)
    }

    pub fn agent_blocked(&self) -> &FnvHashSet<Point> {
        &self.agent
    }

    pub fn wall_blocked(&self, movable: usize) -> &FnvHashSet<Point> {
        &self.walls[movable]
    }

    pub fn push_offsets(&self, pusher: usize, pushee: usize) -> &FnvHashSet<Point> {
        &self.pushes[pusher][pushee]
    }

    pub fn stats(&self) -> CollisionStats {
        CollisionStats {
            agent_blocked: self.agent.len(),
            wall_blocked: self.walls.iter().map(|set| set.len()).sum(),
            push_offsets: self
                .pushes
                .iter()
                .flat_map(|row| row.iter())
                .map(|set| set.len())
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionStats {
    pub agent_blocked: usize,
    pub wall_blocked: usize,
    pub push_offsets: usize,
}

#[derive(Debug, Clone)]
pub struct CollisionMap {
    actions: Vec<ActionCollisions>,
}

impl CollisionMap {
    /// `movables[0]` is the agent. `walls` and `agent_walls` are in the global frame,
    /// `dimensions` includes the border.
    pub fn build(
        movables: &[&Shape],
        walls: &Shape,
        agent_walls: Option<&Shape>,
        dimensions: Point,
    ) -> Self {
        assert!(!movables.is_empty(), "the agent is always a movable");

        let mut agent_obstacles = walls.clone();
        if let Some(agent_walls) = agent_walls {
            agent_obstacles.extend(agent_walls);
        }

        let actions: Vec<_> = ACTIONS
            .iter()
            .map(|&action| {
                ActionCollisions::build(action, movables, walls, &agent_obstacles, dimensions)
            }).collect();

        let map = CollisionMap { actions };
        for &action in &ACTIONS {
            let stats = map.for_action(action).stats();
            debug!(
                "Collision map {}: {} agent blocked, {} wall blocked, {} push offsets",
                action, stats.agent_blocked, stats.wall_blocked, stats.push_offsets
            );
        }
        map
    }

    pub fn for_action(&self, action: Action) -> &ActionCollisions {
        &self.actions[action.index()]
    }
}

impl Display for CollisionMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_titles(Row::new(vec![
            Cell::new("Action"),
            Cell::new("Agent blocked"),
            Cell::new("Wall blocked"),
            Cell::new("Push offsets"),
        ]));
        for &action in &ACTIONS {
            let stats = self.for_action(action).stats();
            table.add_row(Row::new(vec![
                Cell::new(&action.to_string()),
                Cell::new(&(stats.agent_blocked as u64).separated_string()),
                Cell::new(&(stats.wall_blocked as u64).separated_string()),
                Cell::new(&(stats.push_offsets as u64).separated_string()),
            ]));
        }
        write!(f, "{}", table)
    }
}

/// Anchors of `object` from which moving by `action` runs into `obstacles`.
///
/// Anchors where the object already overlaps the obstacles are left out,
/// such configurations are never reachable.
fn static_collisions(
    object: &Shape,
    obstacles: &Shape,
    action: Action,
    dimensions: Point,
) -> FnvHashSet<Point> {
    let displacement = action.displacement();
    let max_anchor = dimensions - object.extent();

    let mut collisions = FnvHashSet::default();
    for object_cell in object.iter() {
        for obstacle_cell in obstacles.iter() {
            let anchor = obstacle_cell - object_cell - displacement;
            if anchor.x < 0 || anchor.y < 0 || anchor.x > max_anchor.x || anchor.y > max_anchor.y {
                continue;
            }
            if collisions.contains(&anchor) {
                continue;
            }
            if !overlap(object, obstacles, anchor) {
                collisions.insert(anchor);
            }
        }
    }
    collisions
}

/// Offsets `pusher.anchor - pushee.anchor` at which moving the pusher by `action`
/// moves one of its cells into one of the pushee's cells.
fn push_contacts(pusher: &Shape, pushee: &Shape, action: Action) -> FnvHashSet<Point> {
    let displacement = action.displacement();

    let mut contacts = FnvHashSet::default();
    for pusher_cell in pusher.iter() {
        for pushee_cell in pushee.iter() {
            let offset = pushee_cell - pusher_cell - displacement;
            if !overlap(pusher, pushee, offset) {
                contacts.insert(offset);
            }
        }
    }
    contacts
}
