//! Shared constants for card sheet layout
//!
//! This module centralizes magic numbers and defaults used throughout
//! the layout process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// PDF user space units per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert a pixel length at the given resolution to points
#[inline]
pub fn px_to_pt(px: u32, dpi: u32) -> f64 {
    px as f64 * POINTS_PER_INCH / dpi as f64
}

/// Convert a physical length to whole pixels, truncating toward zero
#[inline]
pub fn inches_to_px(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64) as u32
}

// =============================================================================
// Defaults
// =============================================================================

/// Default output resolution
pub const DEFAULT_DPI: u32 = 300;

/// Default card width (poker card)
pub const DEFAULT_CARD_WIDTH_IN: f64 = 2.5;

/// Default card height (poker card)
pub const DEFAULT_CARD_HEIGHT_IN: f64 = 3.5;

/// Default spacing around each card: 10 pixels at 300 dpi
pub const DEFAULT_MARGIN_IN: f64 = 10.0 / 300.0;

/// Default page background
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

// =============================================================================
// Output
// =============================================================================

/// Resource name of the page image inside each PDF page
pub const PAGE_IMAGE_NAME: &str = "Im0";

/// Zero padding for page numbers in PNG sequence file names
pub const PAGE_NUMBER_WIDTH: usize = 3;
