//! Pagination: split sorted inputs into page-sized groups

use crate::types::{Result, SheetError};

use super::PageGroup;

/// Split `items` into consecutive groups of `images_per_page`.
///
/// Only the last group may be shorter. Empty input yields no groups.
pub fn paginate<T>(items: &[T], images_per_page: usize) -> Result<Vec<PageGroup<'_, T>>> {
    if images_per_page == 0 {
        return Err(SheetError::Config(
            "Pages must hold at least one image".to_string(),
        ));
    }

    Ok(items
        .chunks(images_per_page)
        .enumerate()
        .map(|(page_index, items)| PageGroup {
            page_index,
            first_index: page_index * images_per_page,
            items,
        })
        .collect())
}
