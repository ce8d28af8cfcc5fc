//! Page geometry calculation
//!
//! Converts physical page and card sizes to pixels and derives how many
//! cells fit on a page.

use crate::constants::inches_to_px;
use crate::options::SheetOptions;
use crate::types::{Axis, Result, SheetError};

use super::GridPosition;

/// Pixel geometry of a sheet, computed once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub page_width_px: u32,
    pub page_height_px: u32,
    pub cell_width_px: u32,
    pub cell_height_px: u32,
    /// Spacing on every side of a cell
    pub margin_px: u32,
    pub images_per_row: u32,
    pub rows_per_page: u32,
    pub images_per_page: usize,
}

impl Geometry {
    /// Compute the geometry from pixel dimensions.
    ///
    /// Each cell reserves `margin_px` on both sides, so capacity on an axis is
    /// `floor(page / (cell + 2 * margin))`. A cell that does not fit even once
    /// is a configuration error.
    pub fn from_pixels(
        page_width_px: u32,
        page_height_px: u32,
        cell_width_px: u32,
        cell_height_px: u32,
        margin_px: u32,
    ) -> Result<Self> {
        if cell_width_px == 0 || cell_height_px == 0 {
            return Err(SheetError::Config(format!(
                "Cell size must be at least one pixel, got {}x{}",
                cell_width_px, cell_height_px
            )));
        }

        let images_per_row = fit_count(Axis::Horizontal, page_width_px, cell_width_px, margin_px)?;
        let rows_per_page = fit_count(Axis::Vertical, page_height_px, cell_height_px, margin_px)?;

        Ok(Self {
            page_width_px,
            page_height_px,
            cell_width_px,
            cell_height_px,
            margin_px,
            images_per_row,
            rows_per_page,
            images_per_page: images_per_row as usize * rows_per_page as usize,
        })
    }

    /// Compute the geometry from physical options, truncating every length
    /// to whole pixels.
    pub fn from_options(options: &SheetOptions) -> Result<Self> {
        options.validate()?;

        let (page_w_in, page_h_in) = options.page_dimensions_in();
        let dpi = options.dpi;

        Self::from_pixels(
            inches_to_px(page_w_in, dpi),
            inches_to_px(page_h_in, dpi),
            inches_to_px(options.card_width_in, dpi),
            inches_to_px(options.card_height_in, dpi),
            inches_to_px(options.margin_in, dpi),
        )
    }

    /// Number of pages needed for `image_count` images
    pub fn page_count(&self, image_count: usize) -> usize {
        image_count.div_ceil(self.images_per_page)
    }

    /// Row and column of a slot within a page
    pub fn slot_position(&self, slot: usize) -> GridPosition {
        let per_row = self.images_per_row as usize;
        GridPosition {
            row: slot / per_row,
            col: slot % per_row,
        }
    }

    /// Top-left pixel of a slot's cell
    pub fn slot_origin(&self, slot: usize) -> (u32, u32) {
        let pos = self.slot_position(slot);
        (
            self.margin_px + pos.col as u32 * (self.cell_width_px + self.margin_px),
            self.margin_px + pos.row as u32 * (self.cell_height_px + self.margin_px),
        )
    }
}

fn fit_count(axis: Axis, page_px: u32, cell_px: u32, margin_px: u32) -> Result<u32> {
    let required_px = cell_px.saturating_add(margin_px.saturating_mul(2));
    let count = page_px / required_px;
    if count == 0 {
        return Err(SheetError::CellDoesNotFit {
            axis,
            required_px,
            available_px: page_px,
        });
    }
    Ok(count)
}
