use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Card sheet configuration
///
/// Physical sizes are in inches and converted to pixels at `dpi`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SheetOptions {
    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub dpi: u32,

    // Cells
    pub card_width_in: f64,
    pub card_height_in: f64,
    pub margin_in: f64,

    // Rendering
    pub background: [u8; 3],
    pub resample: ResampleFilter,
    pub decode_policy: DecodePolicy,

    // Output
    pub output_format: OutputFormat,

    /// Maximum number of pages composed at once
    pub parallel_pages: usize,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            dpi: DEFAULT_DPI,
            card_width_in: DEFAULT_CARD_WIDTH_IN,
            card_height_in: DEFAULT_CARD_HEIGHT_IN,
            margin_in: DEFAULT_MARGIN_IN,
            background: DEFAULT_BACKGROUND,
            resample: ResampleFilter::default(),
            decode_policy: DecodePolicy::default(),
            output_format: OutputFormat::default(),
            parallel_pages: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl SheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page dimensions in inches with orientation applied
    pub fn page_dimensions_in(&self) -> (f64, f64) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Validate the options
    ///
    /// Capacity (whether a cell fits on the page at all) is checked when the
    /// geometry is computed.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(SheetError::Config("DPI must be greater than zero".to_string()));
        }

        let (page_w, page_h) = self.page_dimensions_in();
        let lengths = [
            ("Page width", page_w),
            ("Page height", page_h),
            ("Card width", self.card_width_in),
            ("Card height", self.card_height_in),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(SheetError::Config(format!(
                    "{} must be a positive length, got {}",
                    name, value
                )));
            }
        }

        if !(self.margin_in.is_finite() && self.margin_in >= 0.0) {
            return Err(SheetError::Config(format!(
                "Margin must not be negative, got {}",
                self.margin_in
            )));
        }

        if self.parallel_pages == 0 {
            return Err(SheetError::Config(
                "At least one page must be composed at a time".to_string(),
            ));
        }

        Ok(())
    }
}
