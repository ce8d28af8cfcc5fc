//! PNG sequence output

use crate::compose::CompositePage;
use crate::constants::PAGE_NUMBER_WIDTH;
use crate::types::Result;
use image::ImageFormat;
use std::path::{Path, PathBuf};

use super::PageWriter;

/// Writes each page to `<stem>-<n>.png` next to the output path, `n`
/// counting from 1.
pub struct PngSequenceWriter {
    dir: PathBuf,
    stem: String,
    written: Vec<PathBuf>,
}

impl PngSequenceWriter {
    pub fn new(output: impl AsRef<Path>) -> Self {
        let output = output.as_ref();
        let dir = output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let stem = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());
        Self {
            dir,
            stem,
            written: Vec::new(),
        }
    }

    /// Path of the file for a zero-based page index
    pub fn page_path(&self, page_index: usize) -> PathBuf {
        self.dir.join(format!(
            "{}-{:0width$}.png",
            self.stem,
            page_index + 1,
            width = PAGE_NUMBER_WIDTH
        ))
    }

    /// Files written so far, in page order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PageWriter for PngSequenceWriter {
    fn append(&mut self, page: CompositePage) -> Result<()> {
        let path = self.page_path(self.written.len());
        page.image.save_with_format(&path, ImageFormat::Png)?;
        log::debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn pages_written(&self) -> usize {
        self.written.len()
    }

    /// Removes numbered pages past the last one written, left over from an
    /// earlier run with more pages.
    fn finish(self) -> Result<()> {
        let mut index = self.written.len();
        loop {
            let stale = self.page_path(index);
            match std::fs::remove_file(&stale) {
                Ok(()) => log::debug!("Removed stale {}", stale.display()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => break,
                Err(err) => return Err(err.into()),
            }
            index += 1;
        }

        log::info!(
            "Wrote {} page(s) to {}",
            self.written.len(),
            self.dir.display()
        );
        Ok(())
    }
}
