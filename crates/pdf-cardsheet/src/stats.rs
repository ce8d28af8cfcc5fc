use crate::layout::Geometry;
use crate::options::SheetOptions;
use crate::types::*;

/// Calculate the layout statistics for `image_count` images without
/// composing anything
pub fn calculate_statistics(image_count: usize, options: &SheetOptions) -> Result<SheetStatistics> {
    let geometry = Geometry::from_options(options)?;
    Ok(statistics_for(image_count, &geometry))
}

/// Layout statistics for an already computed geometry
pub fn statistics_for(image_count: usize, geometry: &Geometry) -> SheetStatistics {
    let output_pages = geometry.page_count(image_count);
    let empty_cells = output_pages * geometry.images_per_page - image_count;

    SheetStatistics {
        source_images: image_count,
        images_per_row: geometry.images_per_row,
        rows_per_page: geometry.rows_per_page,
        images_per_page: geometry.images_per_page,
        output_pages,
        empty_cells,
    }
}
