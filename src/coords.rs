//! Mapping between screen points and document offsets.
//!
//! Layout belongs to the rendering collaborator; the core only needs the two
//! directions of the mapping plus a few metrics. [`GridMapper`] is a
//! monospace implementation used by the replay tool and the tests.

use serde::{Deserialize, Serialize};

use crate::document::DocumentFacade;
use crate::selection::SelectionPosition;

/// A point in surface coordinates (logical pixels, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shift the rectangle by (dx, dy)
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Converts between surface points and document positions.
pub trait CoordinateMapper {
    /// Document position closest to `point`, never inside virtual space
    fn position_from_location(&self, doc: &dyn DocumentFacade, point: Point) -> usize {
        self.sposition_from_location(doc, point, false).position
    }

    /// Document position closest to `point`. With `virtual_space`, points
    /// past the end of a line report the number of columns beyond it.
    fn sposition_from_location(
        &self,
        doc: &dyn DocumentFacade,
        point: Point,
        virtual_space: bool,
    ) -> SelectionPosition;

    /// Top-left corner of the character cell at `position`
    fn location_from_position(&self, doc: &dyn DocumentFacade, position: usize) -> Point;

    /// Height of one text line
    fn line_height(&self) -> f64;

    /// Number of fully visible lines (page size for PageUp/PageDown)
    fn lines_on_screen(&self) -> usize;
}

/// Monospace grid layout: every character occupies one `char_width` cell.
#[derive(Debug, Clone)]
pub struct GridMapper {
    pub char_width: f64,
    pub line_height: f64,
    /// Top-left of the text area (after margins)
    pub origin: Point,
    pub visible_lines: usize,
}

impl Default for GridMapper {
    fn default() -> Self {
        Self {
            char_width: 10.0,
            line_height: 20.0,
            origin: Point::new(0.0, 0.0),
            visible_lines: 25,
        }
    }
}

impl GridMapper {
    pub fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
            ..Self::default()
        }
    }

    /// Point at the centre of cell (line, column); handy for driving gestures
    pub fn cell_center(&self, line: usize, column: usize) -> Point {
        Point::new(
            self.origin.x + (column as f64 + 0.5) * self.char_width,
            self.origin.y + (line as f64 + 0.5) * self.line_height,
        )
    }
}

impl CoordinateMapper for GridMapper {
    fn sposition_from_location(
        &self,
        doc: &dyn DocumentFacade,
        point: Point,
        virtual_space: bool,
    ) -> SelectionPosition {
        let last_line = doc.line_count().saturating_sub(1);
        let row = ((point.y - self.origin.y) / self.line_height).floor();
        let line = if row < 0.0 {
            0
        } else {
            (row as usize).min(last_line)
        };

        // Round to the nearest character boundary
        let col = ((point.x - self.origin.x) / self.char_width).round();
        let column = if col < 0.0 { 0 } else { col as usize };

        let start = doc.line_start(line);
        let end = doc.line_end(line);
        let line_text = doc.text_range(start..end);
        let line_chars = line_text.chars().count();

        if column >= line_chars {
            let virtual_columns = if virtual_space {
                column - line_chars
            } else {
                0
            };
            return SelectionPosition::with_virtual_space(end, virtual_columns);
        }

        let offset = line_text
            .char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line_text.len());
        SelectionPosition::new(start + offset)
    }

    fn location_from_position(&self, doc: &dyn DocumentFacade, position: usize) -> Point {
        let position = position.min(doc.len());
        let line = doc.line_from_position(position);
        let start = doc.line_start(line);
        let column = doc.text_range(start..position).chars().count();
        Point::new(
            self.origin.x + column as f64 * self.char_width,
            self.origin.y + line as f64 * self.line_height,
        )
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn lines_on_screen(&self) -> usize {
        self.visible_lines.max(1)
    }
}
