use crate::collision::CollisionMap;
use crate::config::Variant;
use crate::data::{Action, Point, AGENT_INDEX};
use crate::object::Object;
use crate::plan::Plan;
use crate::shape::Shape;
use crate::state::{State, StateErr};
use crate::state_formatter::StateFormatter;
use crate::PushWorld;

/// A puzzle with walls, agent walls, movables and goals.
///
/// Objects and collision tables never change after loading, transitions take `&self`
/// and keep their scratch space on the stack so a puzzle can be shared between threads.
#[derive(Debug, Clone)]
pub struct Puzzle {
    movables: Vec<Object>,
    goals: Vec<Object>,
    walls: Object,
    agent_walls: Option<Object>,
    dimensions: Point,
    initial_state: State,
    goal_state: Vec<Point>,
    collisions: CollisionMap,
}

impl Puzzle {
    /// `movables[0]` is the agent, `goals[k]` belongs to `movables[k + 1]`.
    /// `dimensions` includes the border, which must be part of `walls`.
    pub(crate) fn new(
        movables: Vec<Object>,
        goals: Vec<Object>,
        walls: Object,
        agent_walls: Option<Object>,
        dimensions: Point,
    ) -> Self {
        assert!(!movables.is_empty(), "no agent");
        assert!(goals.len() < movables.len(), "more goals than movables");

        let initial_state = State::new(movables.iter().map(|m| m.anchor).collect());
        let goal_state = goals.iter().map(|g| g.anchor).collect();

        debug!(
            "Building collision map for {} movables on {}x{}",
            movables.len(),
            dimensions.x,
            dimensions.y
        );
        let shapes: Vec<&Shape> = movables.iter().map(|m| &m.shape).collect();
        let collisions = CollisionMap::build(
            &shapes,
            &walls.shape,
            agent_walls.as_ref().map(|aw| &aw.shape),
            dimensions,
        );

        Puzzle {
            movables,
            goals,
            walls,
            agent_walls,
            dimensions,
            initial_state,
            goal_state,
            collisions,
        }
    }

    pub fn movables(&self) -> &[Object] {
        &self.movables
    }

    pub fn goals(&self) -> &[Object] {
        &self.goals
    }

    pub fn walls(&self) -> &Object {
        &self.walls
    }

    pub fn agent_walls(&self) -> Option<&Object> {
        self.agent_walls.as_ref()
    }

    pub fn collisions(&self) -> &CollisionMap {
        &self.collisions
    }

    fn check_state(&self, state: &State) -> Result<(), StateErr> {
        if state.len() == self.movables.len() {
            Ok(())
        } else {
            Err(StateErr {
                expected: self.movables.len(),
                got: state.len(),
            })
        }
    }

    /// Expects a state of the right length.
    fn transition(&self, state: &State, action: Action) -> State {
        let collisions = self.collisions.for_action(action);
        let positions = state.positions();

        if collisions.is_agent_blocked(positions[AGENT_INDEX]) {
            trace!("Agent at {} can't move {}", positions[AGENT_INDEX], action);
            return state.clone();
        }

        // every test reads the original positions, so the order in which
        // pushers are processed doesn't affect the result
        let mut pushed = vec![false; positions.len()];
        pushed[AGENT_INDEX] = true;
        let mut to_visit = vec![AGENT_INDEX];

        while let Some(pusher) = to_visit.pop() {
            for pushee in 1..positions.len() {
                if pushed[pushee] {
                    continue;
                }
                let offset = positions[pusher] - positions[pushee];
                if !collisions.pushes(pusher, pushee, offset) {
                    continue;
                }
                if collisions.is_wall_blocked(pushee, positions[pushee]) {
                    trace!(
                        "{} pushed {} by {} into a wall, nothing moves",
                        self.movables[pusher].id,
                        self.movables[pushee].id,
                        action
                    );
                    return state.clone();
                }
                pushed[pushee] = true;
                to_visit.push(pushee);
            }
        }

        let displacement = action.displacement();
        let next = positions
            .iter()
            .zip(&pushed)
            .map(|(&pos, &is_pushed)| if is_pushed { pos + displacement } else { pos })
            .collect();
        State::new(next)
    }
}

impl PushWorld for Puzzle {
    fn variant(&self) -> Variant {
        Variant::Standard
    }

    fn dimensions(&self) -> Point {
        self.dimensions
    }

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn goal_state(&self) -> &[Point] {
        &self.goal_state
    }

    fn next_state(&self, state: &State, action: Action) -> Result<State, StateErr> {
        self.check_state(state)?;
        Ok(self.transition(state, action))
    }

    fn count_achieved_goals(&self, state: &State) -> usize {
        self.goal_state
            .iter()
            .zip(state.positions().iter().skip(1))
            .filter(|&(goal, pos)| goal == pos)
            .count()
    }

    fn is_goal_state(&self, state: &State) -> bool {
        self.count_achieved_goals(state) == self.goal_state.len()
    }

    /// The goal must be reached by the last action, reaching it earlier doesn't count.
    fn is_valid_plan(&self, plan: &Plan) -> bool {
        let mut state = self.initial_state.clone();
        for &action in plan {
            if self.is_goal_state(&state) {
                debug!("Goal reached before the plan ended");
                return false;
            }
            state = self.transition(&state, action);
        }
        self.is_goal_state(&state)
    }

    fn replay(&self, plan: &Plan) -> Vec<State> {
        let mut states = Vec::with_capacity(plan.len() + 1);
        states.push(self.initial_state.clone());
        for &action in plan {
            let next = self.transition(&states[states.len() - 1], action);
            states.push(next);
        }
        states
    }

    fn format_state<'a>(&'a self, state: &'a State) -> StateFormatter<'a> {
        let mut layers = Vec::new();
        if let Some(ref agent_walls) = self.agent_walls {
            layers.push((agent_walls.id.as_str(), agent_walls.cells()));
        }
        layers.push((self.walls.id.as_str(), self.walls.cells()));
        for goal in &self.goals {
            layers.push((goal.id.as_str(), goal.cells()));
        }
        for (movable, &pos) in self.movables.iter().zip(state.positions()) {
            layers.push((movable.id.as_str(), movable.cells_at(pos)));
        }
        // the border isn't part of the puzzle file
        StateFormatter::new(
            Point::new(1, 1),
            self.dimensions.x - 2,
            self.dimensions.y - 2,
            layers,
        )
    }

    fn collision_map(&self) -> Option<&CollisionMap> {
        Some(&self.collisions)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    use crate::data::Action::*;
    use crate::data::ACTIONS;
    use crate::shape::overlap;

    fn puzzle(text: &str) -> Puzzle {
        text.parse().unwrap()
    }

    fn state(positions: &[(i32, i32)]) -> State {
        State::new(positions.iter().map(|&p| Point::from(p)).collect())
    }

    fn index_of(puzzle: &Puzzle, id: &str) -> usize {
        puzzle.movables().iter().position(|m| m.id == id).unwrap()
    }

    fn step(puzzle: &Puzzle, state: &State, action: Action) -> State {
        puzzle.next_state(state, action).unwrap()
    }

    /// No two physical objects share a cell.
    fn assert_no_overlap(puzzle: &Puzzle, state: &State) {
        let cells: Vec<_> = puzzle
            .movables()
            .iter()
            .zip(state.positions())
            .map(|(m, &pos)| m.cells_at(pos))
            .collect();
        let zero = Point::default();
        for (i, c) in cells.iter().enumerate() {
            assert!(!overlap(c, &puzzle.walls().shape, zero), "{} in wall", state);
            for other in &cells[i + 1..] {
                assert!(!overlap(c, other, zero), "overlap in {}", state);
            }
        }
        if let Some(aw) = puzzle.agent_walls() {
            assert!(!overlap(&cells[0], &aw.shape, zero));
        }
    }

    #[test]
    fn agent_pushes_movable() {
        let p = puzzle(
            r"
.  .  .
a  m1 .
.  .  g1
",
        );
        let s = p.initial_state().clone();
        assert_eq!(s, state(&[(1, 2), (2, 2)]));

        let next = step(&p, &s, Right);
        assert_eq!(next, state(&[(2, 2), (3, 2)]));
    }

    #[test]
    fn push_into_wall_moves_nothing() {
        let p = puzzle(
            r"
.  .  .
.  a  m1
.  .  g1
",
        );
        let s = p.initial_state().clone();
        // the border is right of m1
        assert_eq!(step(&p, &s, Right), s);

        let p = puzzle(
            r"
. . . . .
a m1 . w g1
",
        );
        let s = p.initial_state().clone();
        let s = step(&p, &s, Right);
        assert_eq!(s, state(&[(2, 2), (3, 2)]));
        // authored wall at (4, 2)
        assert_eq!(step(&p, &s, Right), s);
    }

    #[test]
    fn agent_moves_alone() {
        let p = puzzle(
            r"
.  .  .  .
a  .  .  m1
.  .  .  g1
",
        );
        let s = p.initial_state().clone();
        let next = step(&p, &s, Down);
        assert_eq!(next, state(&[(1, 3), (4, 2)]));
        let next = step(&p, &next, Right);
        assert_eq!(next, state(&[(2, 3), (4, 2)]));
    }

    #[test]
    fn pushes_chain() {
        let p = puzzle(
            r"
a m1 m2 . .
. g1 g2 . .
",
        );
        // goals are ordered by descending id
        assert_eq!(p.movables()[1].id, "m2");
        let s = p.initial_state().clone();
        let next = step(&p, &s, Right);
        assert_eq!(next, state(&[(2, 1), (4, 1), (3, 1)]));

        let next = step(&p, &next, Right);
        assert_eq!(next, state(&[(3, 1), (5, 1), (4, 1)]));

        // chain is blocked by the border as a whole
        assert_eq!(step(&p, &next, Right), next);
    }

    #[test]
    fn blocked_agent_is_noop() {
        let p = puzzle(
            r"
a aw m1
. .  g1
",
        );
        let s = p.initial_state().clone();
        let collisions = p.collisions().for_action(Right);
        assert!(collisions.is_agent_blocked(s.agent()));
        assert_eq!(step(&p, &s, Right), s);
        assert_eq!(step(&p, &s, Right), step(&p, &s, Right));
        assert_eq!(step(&p, &s, Left), s);
        assert_eq!(step(&p, &s, Up), s);
    }

    #[test]
    fn agent_walls_dont_stop_movables() {
        let p = puzzle(
            r"
a m1 aw . g1
",
        );
        let s = p.initial_state().clone();
        // m1 can be pushed onto the agent wall, the agent then can't follow
        let s = step(&p, &s, Right);
        assert_eq!(s, state(&[(2, 1), (3, 1)]));
        assert_eq!(step(&p, &s, Right), s);
    }

    #[test]
    fn shapes_push_as_whole() {
        // m1 is an L, the agent pushes its lower arm up
        let p = puzzle(
            r"
. .  .  .
. m1 .  .
. m1 m1 .
. .  a  g1
",
        );
        let s = p.initial_state().clone();
        assert_eq!(s, state(&[(3, 4), (2, 2)]));
        let s = step(&p, &s, Up);
        assert_eq!(s, state(&[(3, 3), (2, 1)]));
        // the top cell is now against the border
        assert_eq!(step(&p, &s, Up), s);
        assert_no_overlap(&p, &s);
    }

    #[test]
    fn side_contact_doesnt_push() {
        let p = puzzle(
            r"
. m1 .
a .  g1
",
        );
        let s = p.initial_state().clone();
        let next = step(&p, &s, Right);
        assert_eq!(next, state(&[(2, 2), (2, 1)]));
    }

    #[test]
    fn branching_push() {
        // goal-less movables are ordered by first appearance: m2, m1, m3
        let p = puzzle(
            r"
.  .  m2 .
a  m1 m1 .
.  .  m3 .
",
        );
        let s = p.initial_state().clone();
        let next = step(&p, &s, Right);
        // m1 moves, m2 and m3 are beside it, not in front
        assert_eq!(next[0], Point::new(2, 2));
        assert_eq!(next[index_of(&p, "m1")], Point::new(3, 2));
        assert_eq!(next[index_of(&p, "m2")], Point::new(3, 1));
        assert_eq!(next[index_of(&p, "m3")], Point::new(3, 3));

        let p = puzzle(
            r"
.  m2 .  .
.  m1 m1 .
a  m1 m1 .
.  m3 .  .
",
        );
        let s = p.initial_state().clone();
        let next = step(&p, &s, Up);
        // the agent isn't below anything
        assert_eq!(next[0], Point::new(1, 2));
        assert_eq!(next[index_of(&p, "m1")], Point::new(2, 2));
        let next = step(&p, &next, Right);
        assert_eq!(next[0], Point::new(2, 2));
        assert_eq!(next[index_of(&p, "m1")], Point::new(3, 2));
        assert_eq!(next[index_of(&p, "m2")], Point::new(2, 1));
        assert_eq!(next[index_of(&p, "m3")], Point::new(2, 4));
        assert_no_overlap(&p, &next);
    }

    /// The same puzzle with the non-agent movables in `order`.
    fn reordered(puzzle: &Puzzle, order: &[usize]) -> Puzzle {
        let mut movables = vec![puzzle.movables()[AGENT_INDEX].clone()];
        movables.extend(order.iter().map(|&i| puzzle.movables()[i].clone()));
        Puzzle::new(
            movables,
            Vec::new(),
            puzzle.walls().clone(),
            puzzle.agent_walls().cloned(),
            puzzle.dimensions(),
        )
    }

    fn cells_by_id(puzzle: &Puzzle, state: &State) -> Vec<(String, Vec<Point>)> {
        let mut cells: Vec<_> = puzzle
            .movables()
            .iter()
            .zip(state.positions())
            .map(|(m, &pos)| (m.id.clone(), m.cells_at(pos).sorted()))
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn movable_order_doesnt_change_results() {
        let p = puzzle(
            r"
.  m1 m2 .  w
a  m1 m3 .  .
.  .  .  .  .
",
        );
        let plan: Plan = "RRDRUURRUL".parse().unwrap();
        let states = p.replay(&plan);

        // m1 pushes both m2 and m3
        let s = &states[1];
        assert_eq!(s.agent(), Point::new(2, 2));
        assert_eq!(s[index_of(&p, "m1")], Point::new(3, 1));
        assert_eq!(s[index_of(&p, "m2")], Point::new(4, 1));
        assert_eq!(s[index_of(&p, "m3")], Point::new(4, 2));
        // only m2 is against the wall but m3 doesn't move either
        assert_eq!(states[2], states[1]);
        // the agent pushes m3 which pushes m1, m2 stays
        let s = &states[plan.len()];
        assert_eq!(s.agent(), Point::new(4, 2));
        assert_eq!(s[index_of(&p, "m1")], Point::new(2, 1));
        assert_eq!(s[index_of(&p, "m2")], Point::new(4, 1));
        assert_eq!(s[index_of(&p, "m3")], Point::new(3, 2));

        let expected: Vec<_> = states.iter().map(|s| cells_by_id(&p, s)).collect();
        let orders = [
            [1, 2, 3],
            [1, 3, 2],
            [2, 1, 3],
            [2, 3, 1],
            [3, 1, 2],
            [3, 2, 1],
        ];
        for order in orders.iter() {
            let q = reordered(&p, order);
            let got: Vec<_> = q.replay(&plan).iter().map(|s| cells_by_id(&q, s)).collect();
            assert_eq!(got, expected, "order {:?}", order);
        }
    }

    #[test]
    fn goals_and_plans() {
        let p = puzzle(
            r"
a m1 . g1 .
",
        );
        let s = p.initial_state().clone();
        assert_eq!(p.count_achieved_goals(&s), 0);
        assert!(!p.is_goal_state(&s));

        assert!(p.is_valid_plan(&"RR".parse().unwrap()));
        assert!(!p.is_valid_plan(&"R".parse().unwrap()));
        assert!(!p.is_valid_plan(&"".parse().unwrap()));
        // reached the goal before the plan ended
        assert!(!p.is_valid_plan(&"RRL".parse().unwrap()));
        assert!(!p.is_valid_plan(&"RRR".parse().unwrap()));
        // blocked moves still count as actions
        assert!(p.is_valid_plan(&"URR".parse().unwrap()));

        let states = p.replay(&"RR".parse().unwrap());
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], s);
        assert_eq!(p.count_achieved_goals(&states[2]), 1);
        assert!(p.is_goal_state(&states[2]));
    }

    #[test]
    fn goal_counts_are_bounded() {
        let p = puzzle(
            r"
a  m1 .  g1
.  m2 .  g2
.  .  m3 .
",
        );
        assert_eq!(p.goal_state().len(), 2);
        assert_eq!(p.num_movables(), 4);
        let mut s = p.initial_state().clone();
        for &action in [Right, Right, Down, Left, Up, Right, Right, Down, Right].iter() {
            s = step(&p, &s, action);
            let achieved = p.count_achieved_goals(&s);
            assert!(achieved <= 2);
            assert_eq!(p.is_goal_state(&s), achieved == 2);
            assert_no_overlap(&p, &s);
        }
    }

    #[test]
    fn no_goals_is_always_solved() {
        let p = puzzle("a . m1");
        assert!(p.is_goal_state(p.initial_state()));
        assert!(p.is_valid_plan(&Plan::default()));
        assert!(!p.is_valid_plan(&"R".parse().unwrap()));
    }

    #[test]
    fn wrong_state_length() {
        let p = puzzle("a m1 g1");
        assert_eq!(
            p.next_state(&state(&[(1, 1)]), Right).unwrap_err(),
            StateErr {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn random_walk_invariants() {
        let p = puzzle(
            r"
.  .  .  .  .  .
.  a  m1 .  w  .
.  m2 m2 .  .  aw
.  .  m3 .  m4 g1
.  .  m3 g2 .  .
",
        );
        // deterministic pseudo-random walk
        let mut seed: u32 = 12345;
        let mut s = p.initial_state().clone();
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let action = ACTIONS[(seed >> 16) as usize % 4];

            let next = step(&p, &s, action);
            assert_eq!(next, step(&p, &s, action));
            assert_no_overlap(&p, &next);

            // everything that moved moved by exactly one displacement
            let moved: Vec<_> = (0..s.len()).filter(|&i| next[i] != s[i]).collect();
            for &i in &moved {
                assert_eq!(next[i] - s[i], action.displacement());
            }
            // either nothing moved or the agent did
            assert!(moved.is_empty() || moved[0] == AGENT_INDEX);
            if p.collisions().for_action(action).is_agent_blocked(s.agent()) {
                assert!(moved.is_empty());
            }
            assert!(p.count_achieved_goals(&next) <= p.goal_state().len());
            s = next;
        }
    }

    #[test]
    fn shared_between_threads() {
        let p = Arc::new(puzzle(
            r"
a m1 . . .
. m2 . g1 .
. . . g2 .
",
        ));
        let plan: Plan = "RRDLLURRDR".parse().unwrap();
        let expected = p.replay(&plan);

        let mut threads = Vec::new();
        for _ in 0..4 {
            let p = Arc::clone(&p);
            let plan = plan.clone();
            threads.push(thread::spawn(move || p.replay(&plan)));
        }
        for t in threads {
            assert_eq!(t.join().unwrap(), expected);
        }
    }
}
