use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use fnv::FnvHashMap;

use crate::braindead::BraindeadPuzzle;
use crate::data::Point;
use crate::object::Object;
use crate::puzzle::Puzzle;
use crate::shape::{overlap, Shape};

const AGENT: &str = "a";
const WALL: &str = "w";
const AGENT_WALL: &str = "aw";
const EMPTY: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },
    NoAgent,
    NoGoal,
    GoalWithoutMovable(String),
    Overlap(String, String),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::RowLength { row, expected, got } => write!(
                f,
                "Row {} has {} elements but the first row has {}",
                row, got, expected
            ),
            ParserErr::NoAgent => write!(f, "No agent - every puzzle needs an 'a'"),
            ParserErr::NoGoal => write!(f, "No goal - every braindead puzzle needs a 'g1'"),
            ParserErr::GoalWithoutMovable(ref goal) => {
                write!(f, "Goal '{}' has no movable 'm{}'", goal, &goal[1..])
            }
            ParserErr::Overlap(ref a, ref b) => write!(f, "'{}' overlaps '{}'", a, b),
        }
    }
}

impl ::std::error::Error for ParserErr {}

impl FromStr for Puzzle {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_standard(s)
    }
}

impl FromStr for BraindeadPuzzle {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_braindead(s)
    }
}

/// Cells of every element id, in order of first appearance.
#[derive(Debug, Default)]
struct ElementGrid {
    cols: i32,
    rows: i32,
    elements: Vec<(String, Shape)>,
    index: FnvHashMap<String, usize>,
}

impl ElementGrid {
    fn add(&mut self, id: String, pos: Point) {
        let i = match self.index.get(&id) {
            Some(&i) => i,
            None => {
                self.index.insert(id.clone(), self.elements.len());
                self.elements.push((id, Shape::new()));
                self.elements.len() - 1
            }
        };
        self.elements[i].1.insert(pos);
    }

    fn cells(&self, id: &str) -> Option<&Shape> {
        self.index.get(id).map(|&i| &self.elements[i].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.elements.iter().map(|(id, cells)| (id.as_str(), cells))
    }
}

/// Reads the grid of tokens. Rows and columns are numbered from 1,
/// leaving room for the border.
///
/// With `split_joined` a token like `m1+g1` adds both ids to its cell,
/// otherwise the whole token is one id.
fn tokenize(text: &str, split_joined: bool) -> Result<ElementGrid, ParserErr> {
    // trim so puzzles can be written as raw strings more easily
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().map_or(false, |l| l.trim().is_empty()) {
        lines.pop();
    }
    let first = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());

    let mut grid = ElementGrid::default();
    let mut expected = None;
    for (r, line) in lines[first..].iter().enumerate() {
        let row = r + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match expected {
            None => expected = Some(tokens.len()),
            Some(expected) if expected != tokens.len() => {
                return Err(ParserErr::RowLength {
                    row,
                    expected,
                    got: tokens.len(),
                });
            }
            Some(_) => {}
        }

        for (c, token) in tokens.iter().enumerate() {
            let pos = Point::new(c as i32 + 1, row as i32);
            let ids: Vec<&str> = if split_joined {
                token.split('+').collect()
            } else {
                vec![*token]
            };
            for id in ids {
                let id = id.to_lowercase();
                if id.is_empty() || id == EMPTY {
                    continue;
                }
                grid.add(id, pos);
            }
        }
        grid.rows = row as i32;
    }
    grid.cols = expected.unwrap_or(0) as i32;

    trace!("Tokenized {}x{} grid", grid.cols, grid.rows);
    Ok(grid)
}

fn is_goal(id: &str) -> bool {
    id.starts_with('g')
}

fn is_movable(id: &str) -> bool {
    id.starts_with('m')
}

fn border(width: i32, height: i32) -> Shape {
    let mut cells = Shape::new();
    for x in 0..width {
        cells.insert(Point::new(x, 0));
        cells.insert(Point::new(x, height - 1));
    }
    for y in 0..height {
        cells.insert(Point::new(0, y));
        cells.insert(Point::new(width - 1, y));
    }
    cells
}

pub(crate) fn parse_standard(text: &str) -> Result<Puzzle, ParserErr> {
    let grid = tokenize(text, true)?;
    let agent_cells = grid.cells(AGENT).ok_or(ParserErr::NoAgent)?;

    let dimensions = Point::new(grid.cols + 2, grid.rows + 2);
    let mut wall_cells = border(dimensions.x, dimensions.y);
    if let Some(cells) = grid.cells(WALL) {
        wall_cells.extend(cells);
    }
    let walls = Object::fixed(WALL, wall_cells);
    let agent_walls = grid
        .cells(AGENT_WALL)
        .map(|cells| Object::fixed(AGENT_WALL, cells.clone()));

    // goals in descending id order, each followed by its movable in the state
    let mut goal_elements: Vec<_> = grid.iter().filter(|&(id, _)| is_goal(id)).collect();
    goal_elements.sort_by(|a, b| b.0.cmp(a.0));

    let mut movables = vec![Object::from_global_cells(AGENT, agent_cells)];
    let mut goals = Vec::new();
    for (goal_id, goal_cells) in goal_elements {
        let movable_id = format!("m{}", &goal_id[1..]);
        let movable_cells = grid
            .cells(&movable_id)
            .ok_or_else(|| ParserErr::GoalWithoutMovable(goal_id.to_string()))?;
        goals.push(Object::from_global_cells(goal_id, goal_cells));
        movables.push(Object::from_global_cells(movable_id, movable_cells));
    }

    for (id, cells) in grid.iter() {
        if is_movable(id) {
            if movables.iter().all(|m| m.id != id) {
                movables.push(Object::from_global_cells(id, cells));
            }
        } else if !is_goal(id) && id != AGENT && id != WALL && id != AGENT_WALL {
            warn!("Ignoring unknown element '{}'", id);
        }
    }

    check_overlaps(&movables, &walls, agent_walls.as_ref())?;

    debug!(
        "Parsed puzzle: {} movables, {} goals, agent walls: {}",
        movables.len(),
        goals.len(),
        agent_walls.is_some()
    );
    Ok(Puzzle::new(movables, goals, walls, agent_walls, dimensions))
}

/// Rejects initial configurations in which physical objects share cells.
fn check_overlaps(
    movables: &[Object],
    walls: &Object,
    agent_walls: Option<&Object>,
) -> Result<(), ParserErr> {
    let zero = Point::default();
    let cells: Vec<Shape> = movables.iter().map(Object::cells).collect();

    for (i, movable_cells) in cells.iter().enumerate() {
        if overlap(movable_cells, &walls.shape, zero) {
            return Err(ParserErr::Overlap(movables[i].id.clone(), walls.id.clone()));
        }
        for (j, other_cells) in cells.iter().enumerate().skip(i + 1) {
            if overlap(movable_cells, other_cells, zero) {
                return Err(ParserErr::Overlap(
                    movables[i].id.clone(),
                    movables[j].id.clone(),
                ));
            }
        }
    }

    if let Some(agent_walls) = agent_walls {
        if overlap(&cells[0], &agent_walls.shape, zero) {
            return Err(ParserErr::Overlap(
                movables[0].id.clone(),
                agent_walls.id.clone(),
            ));
        }
    }
    Ok(())
}

pub(crate) fn parse_braindead(text: &str) -> Result<BraindeadPuzzle, ParserErr> {
    // only whole tokens count, `a+g1` is neither the agent nor a goal
    let grid = tokenize(text, false)?;
    let agent = grid
        .cells(AGENT)
        .and_then(Shape::min)
        .ok_or(ParserErr::NoAgent)?;

    // all goal ids are merged into one goal
    let mut goal_cells = Shape::new();
    for (id, cells) in grid.iter() {
        if is_goal(id) {
            goal_cells.extend(cells);
        } else if id != AGENT {
            debug!("Braindead puzzles ignore '{}'", id);
        }
    }
    let goal = goal_cells.min().ok_or(ParserErr::NoGoal)?;

    Ok(BraindeadPuzzle::new(
        agent,
        goal,
        Point::new(grid.cols, grid.rows),
    ))
}
