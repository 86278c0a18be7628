use std::ops::{Index, IndexMut};

use crate::data::Point;

/// Dense row-major grid indexed by `Point`, covering `origin .. origin + (cols, rows)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    origin: Point,
    cols: i32,
    rows: i32,
}

impl<T: Clone> Vec2d<T> {
    pub(crate) fn new(origin: Point, cols: i32, rows: i32, default: T) -> Self {
        assert!(cols >= 0 && rows >= 0);
        Vec2d {
            data: vec![default; (cols * rows) as usize],
            origin,
            cols,
            rows,
        }
    }
}

impl<T> Vec2d<T> {
    pub(crate) fn contains(&self, pos: Point) -> bool {
        let rel = pos - self.origin;
        rel.x >= 0 && rel.y >= 0 && rel.x < self.cols && rel.y < self.rows
    }

    /// Iterates rows top to bottom, each as a slice.
    pub(crate) fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on 0
        self.data.chunks(self.cols.max(1) as usize)
    }

    fn offset(&self, pos: Point) -> usize {
        debug_assert!(self.contains(pos), "{} out of bounds", pos);
        let rel = pos - self.origin;
        (rel.y * self.cols + rel.x) as usize
    }
}

impl<T> Index<Point> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Point) -> &Self::Output {
        &self.data[self.offset(index)]
    }
}

impl<T> IndexMut<Point> for Vec2d<T> {
    fn index_mut(&mut self, index: Point) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}
