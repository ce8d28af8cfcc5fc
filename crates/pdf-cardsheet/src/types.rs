use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(
        "Cell does not fit on the page {axis}: needs {required_px}px, page has {available_px}px"
    )]
    CellDoesNotFit {
        axis: Axis,
        required_px: u32,
        available_px: u32,
    },
    #[error("No decodable images in {}", .dir.display())]
    NoDecodableImages { dir: PathBuf },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Page axis, used to report which dimension a cell overflows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontally"),
            Axis::Vertical => f.write_str("vertically"),
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_in: f64, height_in: f64 },
}

impl PaperSize {
    /// Get base dimensions in inches (portrait)
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (11.69, 16.54),
            PaperSize::A4 => (8.27, 11.7),
            PaperSize::A5 => (5.83, 8.27),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_in();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Filter used when resizing a source image to the cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    /// Bicubic
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(filter: ResampleFilter) -> Self {
        use image::imageops::FilterType;
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// What to do with directory entries that are not decodable images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodePolicy {
    /// Fail the whole run on the first undecodable entry
    #[default]
    Abort,
    /// Log a warning and leave the entry out of the layout
    Skip,
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputFormat {
    /// Single multi-page PDF
    #[default]
    Pdf,
    /// One PNG file per page, numbered after the output stem
    PngSequence,
}

/// Statistics about a sheet layout
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Number of source images
    pub source_images: usize,
    /// Cells per row
    pub images_per_row: u32,
    /// Rows per page
    pub rows_per_page: u32,
    /// Cells per page
    pub images_per_page: usize,
    /// Output page count
    pub output_pages: usize,
    /// Unused cells on the last page
    pub empty_cells: usize,
}
