use std::iter::FromIterator;

use fnv::FnvHashSet;

use crate::data::Point;

/// A set of cells. Object shapes are relative to the object's anchor,
/// wall shapes are in the global frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    cells: FnvHashSet<Point>,
}

impl Shape {
    pub fn new() -> Self {
        Shape::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.cells.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().cloned()
    }

    pub(crate) fn insert(&mut self, cell: Point) -> bool {
        self.cells.insert(cell)
    }

    pub(crate) fn extend(&mut self, other: &Shape) {
        self.cells.extend(other.iter());
    }

    /// `{p + offset}` for every cell `p`.
    pub fn translate(&self, offset: Point) -> Shape {
        self.iter().map(|p| p + offset).collect()
    }

    /// Whether some `a` in `self` and `b` in `other` satisfy `a + offset == b`,
    /// i.e. whether `self` placed at `offset` relative to `other` shares a cell with it.
    pub fn overlaps(&self, other: &Shape, offset: Point) -> bool {
        // probe the smaller set
        if self.len() <= other.len() {
            self.iter().any(|a| other.contains(a + offset))
        } else {
            other.iter().any(|b| self.contains(b - offset))
        }
    }

    pub fn min(&self) -> Option<Point> {
        let min_x = self.iter().map(|p| p.x).min()?;
        let min_y = self.iter().map(|p| p.y).min()?;
        Some(Point::new(min_x, min_y))
    }

    /// Width and height of the bounding box, `(0, 0)` when empty.
    pub fn extent(&self) -> Point {
        match self.min() {
            None => Point::default(),
            Some(min) => {
                let max_x = self.iter().map(|p| p.x).max().unwrap_or(min.x);
                let max_y = self.iter().map(|p| p.y).max().unwrap_or(min.y);
                Point::new(max_x - min.x + 1, max_y - min.y + 1)
            }
        }
    }

    /// Cells sorted by row then column, for output that doesn't depend on hashing.
    pub fn sorted(&self) -> Vec<Point> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|p| (p.y, p.x));
        cells
    }
}

impl FromIterator<Point> for Shape {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Shape {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = &'a Point;
    type IntoIter = ::std::collections::hash_set::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// `overlap(A, B, offset)`: some `a` in `A` equals some `b - offset` with `b` in `B`.
pub fn overlap(a: &Shape, b: &Shape, offset: Point) -> bool {
    a.overlaps(b, offset)
}
