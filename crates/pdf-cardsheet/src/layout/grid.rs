//! Grid cursor
//!
//! Walks the cells of a page in row-major order, starting at the top-left
//! margin and stepping by one cell plus one margin.

use super::Geometry;

/// Iterator over the top-left pixel of each cell on a page
#[derive(Debug, Clone)]
pub struct GridCursor {
    x: u32,
    y: u32,
    col: u32,
    remaining: usize,
    geometry: Geometry,
}

impl GridCursor {
    /// Cursor over every cell of a page described by `geometry`
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            x: geometry.margin_px,
            y: geometry.margin_px,
            col: 0,
            remaining: geometry.images_per_page,
            geometry: *geometry,
        }
    }

    fn advance(&mut self) {
        let g = &self.geometry;
        self.x += g.cell_width_px + g.margin_px;
        self.col += 1;
        if self.col == g.images_per_row {
            self.x = g.margin_px;
            self.y += g.cell_height_px + g.margin_px;
            self.col = 0;
        }
    }
}

impl Iterator for GridCursor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let origin = (self.x, self.y);
        self.remaining -= 1;
        self.advance();
        Some(origin)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridCursor {}
