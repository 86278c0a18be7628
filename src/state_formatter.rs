use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Point;
use crate::shape::Shape;
use crate::vec2d::Vec2d;

/// Writes a state in the puzzle file format: one token per cell,
/// `+`-joined ids of everything covering the cell or `.` when empty.
pub struct StateFormatter<'a> {
    origin: Point,
    cols: i32,
    rows: i32,
    /// Drawn in order, so earlier ids come first within a token.
    layers: Vec<(&'a str, Shape)>,
}

impl<'a> StateFormatter<'a> {
    pub(crate) fn new(origin: Point, cols: i32, rows: i32, layers: Vec<(&'a str, Shape)>) -> Self {
        Self {
            origin,
            cols,
            rows,
            layers,
        }
    }

    fn tokens(&self) -> Vec2d<String> {
        let mut ids: Vec2d<Vec<&str>> = Vec2d::new(self.origin, self.cols, self.rows, Vec::new());
        for &(id, ref cells) in &self.layers {
            for cell in cells.iter() {
                // walls include the border which isn't printed
                if ids.contains(cell) {
                    ids[cell].push(id);
                }
            }
        }

        let mut tokens = Vec2d::new(self.origin, self.cols, self.rows, String::new());
        for y in 0..self.rows {
            for x in 0..self.cols {
                let pos = self.origin + Point::new(x, y);
                tokens[pos] = if ids[pos].is_empty() {
                    ".".to_string()
                } else {
                    ids[pos].join("+")
                };
            }
        }
        tokens
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tokens = self.tokens();
        let width = tokens
            .rows_iter()
            .flat_map(|row| row.iter())
            .map(|token| token.len())
            .max()
            .unwrap_or(1);

        for row in tokens.rows_iter() {
            let mut line = String::new();
            for (i, token) in row.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(&format!("{:<1$}", token, width));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl Display for StateFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl Debug for StateFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
