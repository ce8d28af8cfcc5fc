//! Layout calculation for card sheets
//!
//! - Geometry (pixel sizes and page capacity)
//! - Grid cursor (where each cell goes on a page)
//! - Pagination (which inputs go on which page)

mod geometry;
mod grid;
mod paginate;
mod types;

pub use geometry::*;
pub use grid::*;
pub use paginate::*;
pub use types::*;
