pub mod compose;
pub mod constants;
pub mod layout;
pub mod natural;
mod options;
pub mod render;
pub mod sheet;
mod stats;
mod types;

pub use compose::{CompositePage, compose_group, compose_page};
pub use layout::{Geometry, GridCursor, GridPosition, PageGroup, paginate};
pub use natural::{natural_cmp, natural_key, natural_sort, natural_sort_by_key};
pub use options::*;
pub use render::{PageWriter, PdfPageWriter, PngSequenceWriter};
pub use sheet::{ImageHandle, generate_sheets, list_image_files, load_images, write_sheets};
pub use stats::{calculate_statistics, statistics_for};
pub use types::*;
