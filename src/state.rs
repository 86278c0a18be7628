use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::Index;

use crate::data::{Point, AGENT_INDEX};

/// Anchor positions of all movables, the agent first.
///
/// Movables have their own shapes and goals, so the order is fixed per puzzle
/// and never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State(Vec<Point>);

impl State {
    pub fn new(positions: Vec<Point>) -> State {
        State(positions)
    }

    pub fn agent(&self) -> Point {
        self.0[AGENT_INDEX]
    }

    pub fn positions(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for State {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.0[index]
    }
}

impl From<Vec<Point>> for State {
    fn from(positions: Vec<Point>) -> Self {
        State(positions)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, pos) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pos)?;
        }
        write!(f, "]")
    }
}

/// A state that wasn't produced for the puzzle it's used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateErr {
    pub expected: usize,
    pub got: usize,
}

impl Display for StateErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State has {} positions but the puzzle has {} movables",
            self.got, self.expected
        )
    }
}

impl Error for StateErr {}
