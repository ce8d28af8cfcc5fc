//! Page compositing
//!
//! Draws the images of one page group onto a blank canvas, one grid cell
//! each, in row-major order.

use crate::layout::{Geometry, GridCursor, PageGroup};
use crate::options::SheetOptions;
use crate::sheet::ImageHandle;
use crate::types::{ResampleFilter, Result};
use image::{DynamicImage, Rgb, RgbImage, imageops};

/// A finished page canvas
#[derive(Debug, Clone)]
pub struct CompositePage {
    /// Zero-based output page index
    pub page_index: usize,
    /// Number of cells filled
    pub placed: usize,
    pub image: RgbImage,
}

/// Canvas for a single page being composed
struct PageCanvas {
    image: RgbImage,
    cursor: GridCursor,
    cell_width_px: u32,
    cell_height_px: u32,
    filter: imageops::FilterType,
    placed: usize,
}

impl PageCanvas {
    fn new(geometry: &Geometry, background: [u8; 3], filter: ResampleFilter) -> Self {
        Self {
            image: RgbImage::from_pixel(
                geometry.page_width_px,
                geometry.page_height_px,
                Rgb(background),
            ),
            cursor: GridCursor::new(geometry),
            cell_width_px: geometry.cell_width_px,
            cell_height_px: geometry.cell_height_px,
            filter: filter.into(),
            placed: 0,
        }
    }

    /// Resize `source` to the cell size and paste it at the next free cell.
    /// Returns false once the page is full.
    fn place(&mut self, source: &DynamicImage) -> bool {
        let Some((x, y)) = self.cursor.next() else {
            return false;
        };
        let cell = imageops::resize(
            &source.to_rgb8(),
            self.cell_width_px,
            self.cell_height_px,
            self.filter,
        );
        imageops::replace(&mut self.image, &cell, x as i64, y as i64);
        self.placed += 1;
        true
    }

    fn finish(self, page_index: usize) -> CompositePage {
        CompositePage {
            page_index,
            placed: self.placed,
            image: self.image,
        }
    }
}

/// Compose already decoded images onto one page.
///
/// Images beyond the page capacity are not drawn; pagination never hands
/// a page more than it holds.
pub fn compose_page<'a, I>(
    geometry: &Geometry,
    page_index: usize,
    images: I,
    background: [u8; 3],
    filter: ResampleFilter,
) -> CompositePage
where
    I: IntoIterator<Item = &'a DynamicImage>,
{
    let mut canvas = PageCanvas::new(geometry, background, filter);
    for image in images {
        if !canvas.place(image) {
            break;
        }
    }
    canvas.finish(page_index)
}

/// Decode and compose one page group.
///
/// Each source is decoded right before it is drawn and dropped right after,
/// so at most one decoded source is alive per page.
pub fn compose_group(
    geometry: &Geometry,
    group: &PageGroup<'_, ImageHandle>,
    options: &SheetOptions,
) -> Result<CompositePage> {
    let mut canvas = PageCanvas::new(geometry, options.background, options.resample);
    for handle in group.items {
        let source = handle.decode()?;
        if !canvas.place(&source) {
            break;
        }
    }

    log::debug!(
        "Composed page {} with {} image(s)",
        group.page_index + 1,
        canvas.placed
    );
    Ok(canvas.finish(group.page_index))
}
