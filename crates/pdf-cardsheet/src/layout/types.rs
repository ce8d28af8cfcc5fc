//! Layout data types for card sheets

/// Position within the page grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The contiguous run of sorted inputs assigned to one output page
#[derive(Debug, Clone, PartialEq)]
pub struct PageGroup<'a, T> {
    /// Zero-based output page index
    pub page_index: usize,
    /// Index of the first item within the whole sorted input
    pub first_index: usize,
    /// Items on this page, in placement order
    pub items: &'a [T],
}

impl<T> PageGroup<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
