//! Output document writers
//!
//! A writer receives finished pages in output order and persists them:
//! - PDF: one full-page raster image per PDF page
//! - PNG sequence: one numbered file per page

mod pdf;
mod png;

pub use pdf::PdfPageWriter;
pub use png::PngSequenceWriter;

use crate::compose::CompositePage;
use crate::types::Result;

/// Append-only sink for composed pages
pub trait PageWriter {
    /// Append the next page. The first call starts the document.
    fn append(&mut self, page: CompositePage) -> Result<()>;

    /// Number of pages appended so far
    fn pages_written(&self) -> usize;

    /// Flush the document to its destination
    fn finish(self) -> Result<()>
    where
        Self: Sized;
}
