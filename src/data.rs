use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Neg, Sub};

pub(crate) const NUM_ACTIONS: usize = 4;
pub(crate) const AGENT_INDEX: usize = 0;

/// A discrete position. `x` grows to the right (columns), `y` grows down (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

/// In index order, `ACTIONS[a.index()] == a`.
pub const ACTIONS: [Action; NUM_ACTIONS] = [Action::Left, Action::Right, Action::Up, Action::Down];

impl Action {
    pub fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
        }
    }

    pub fn displacement(self) -> Point {
        match self {
            Action::Left => Point::new(-1, 0),
            Action::Right => Point::new(1, 0),
            Action::Up => Point::new(0, -1),
            Action::Down => Point::new(0, 1),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Action::Left => 'L',
            Action::Right => 'R',
            Action::Up => 'U',
            Action::Down => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Action> {
        match c.to_ascii_uppercase() {
            'L' => Some(Action::Left),
            'R' => Some(Action::Right),
            'U' => Some(Action::Up),
            'D' => Some(Action::Down),
            _ => None,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
            Action::Up => write!(f, "up"),
            Action::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionErr(pub usize);

impl Display for ActionErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid action {} - expected a value in [0, {})",
            self.0, NUM_ACTIONS
        )
    }
}

impl Error for ActionErr {}

impl TryFrom<usize> for Action {
    type Error = ActionErr;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        ACTIONS.get(index).cloned().ok_or(ActionErr(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_encoding() {
        for (i, &action) in ACTIONS.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::try_from(i).unwrap(), action);
            assert_eq!(Action::from_char(action.to_char()), Some(action));
        }
        assert_eq!(Action::try_from(4).unwrap_err(), ActionErr(4));
        assert_eq!(Action::from_char('x'), None);
        assert_eq!(Action::from_char('d'), Some(Action::Down));
    }

    #[test]
    fn displacements_are_unit_and_opposite() {
        assert_eq!(Action::Left.displacement(), -Action::Right.displacement());
        assert_eq!(Action::Up.displacement(), -Action::Down.displacement());
        for &action in &ACTIONS {
            let d = action.displacement();
            assert_eq!(d.x.abs() + d.y.abs(), 1);
        }
        assert_eq!(Action::Up.displacement(), Point::new(0, -1));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3, -2);
        let b = Point::from((1, 5));
        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -7));
        assert_eq!((a - b) + b, a);
        assert_eq!(a.to_string(), "(3, -2)");
    }
}
