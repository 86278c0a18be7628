use crate::data::Point;
use crate::shape::Shape;

/// A shape placed in the world. For movables the anchor is the initial position,
/// for walls it's the origin and the shape is already global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub id: String,
    pub anchor: Point,
    pub shape: Shape,
}

impl Object {
    pub fn new<S: Into<String>>(id: S, anchor: Point, shape: Shape) -> Self {
        Object {
            id: id.into(),
            anchor,
            shape,
        }
    }

    /// Normalizes global `cells` so the shape's minimum is the local origin.
    pub fn from_global_cells<S: Into<String>>(id: S, cells: &Shape) -> Self {
        let anchor = cells.min().unwrap_or_default();
        Object::new(id, anchor, cells.translate(-anchor))
    }

    /// A static object whose shape is expressed in the global frame.
    pub fn fixed<S: Into<String>>(id: S, cells: Shape) -> Self {
        Object::new(id, Point::default(), cells)
    }

    /// Global cells with the anchor moved to `anchor`.
    pub fn cells_at(&self, anchor: Point) -> Shape {
        self.shape.translate(anchor)
    }

    pub fn cells(&self) -> Shape {
        self.cells_at(self.anchor)
    }
}
