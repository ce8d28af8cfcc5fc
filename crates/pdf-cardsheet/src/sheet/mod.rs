//! Card sheet generation
//!
//! This module orchestrates the whole run:
//! 1. Compute the page geometry (fails before any I/O if a card cannot fit)
//! 2. Load and naturally sort the source images
//! 3. Split them into page groups
//! 4. Compose pages in parallel and hand them to the writer in page order

mod io;

pub use io::{ImageHandle, list_image_files, load_images};

use crate::compose::compose_group;
use crate::layout::{Geometry, PageGroup, paginate};
use crate::options::SheetOptions;
use crate::render::{PageWriter, PdfPageWriter, PngSequenceWriter};
use crate::stats::statistics_for;
use crate::types::*;
use futures::stream::{self, StreamExt};
use std::path::Path;

/// Lay out every image of `input_dir` on pages and write them to `output`.
///
/// Returns the statistics of the written layout. An empty directory is not
/// an error and produces no pages.
pub async fn generate_sheets(
    input_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &SheetOptions,
) -> Result<SheetStatistics> {
    let geometry = Geometry::from_options(options)?;
    log::info!(
        "Page {}x{}px, cell {}x{}px, margin {}px: {} x {} = {} per page",
        geometry.page_width_px,
        geometry.page_height_px,
        geometry.cell_width_px,
        geometry.cell_height_px,
        geometry.margin_px,
        geometry.images_per_row,
        geometry.rows_per_page,
        geometry.images_per_page
    );

    let images = load_images(input_dir, options.decode_policy).await?;

    let output = output.as_ref().to_owned();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let pages = match options.output_format {
        OutputFormat::Pdf => {
            let writer = PdfPageWriter::new(&output, options.dpi);
            write_sheets(&images, &geometry, options, writer).await?
        }
        OutputFormat::PngSequence => {
            let writer = PngSequenceWriter::new(&output);
            write_sheets(&images, &geometry, options, writer).await?
        }
    };

    let stats = statistics_for(images.len(), &geometry);
    debug_assert_eq!(pages, stats.output_pages);
    Ok(stats)
}

/// Compose `images` page by page and append each page to `writer`.
///
/// Up to `options.parallel_pages` pages are composed at once on the
/// blocking pool; pages reach the writer strictly in page order. Returns
/// the number of pages written.
pub async fn write_sheets<W>(
    images: &[ImageHandle],
    geometry: &Geometry,
    options: &SheetOptions,
    mut writer: W,
) -> Result<usize>
where
    W: PageWriter + Send + 'static,
{
    let groups = paginate(images, geometry.images_per_page)?;
    let total = groups.len();

    let mut pages = stream::iter(groups.into_iter().map(|group| {
        let geometry = *geometry;
        let options = options.clone();
        let page_index = group.page_index;
        let first_index = group.first_index;
        let items = group.items.to_vec();
        tokio::task::spawn_blocking(move || {
            let group = PageGroup {
                page_index,
                first_index,
                items: &items,
            };
            compose_group(&geometry, &group, &options)
        })
    }))
    .buffered(options.parallel_pages.max(1));

    while let Some(page) = pages.next().await {
        let page = page??;
        log::info!("Writing page {}/{}", page.page_index + 1, total);
        writer = tokio::task::spawn_blocking(move || {
            writer.append(page)?;
            Ok::<_, SheetError>(writer)
        })
        .await??;
    }

    let written = writer.pages_written();
    tokio::task::spawn_blocking(move || writer.finish()).await??;
    Ok(written)
}
