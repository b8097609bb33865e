//! Listing options shared by the list operations

use core_kernel::{SortDirection, SortState};

/// Text filter plus sort column for a list operation
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions<F> {
    pub query: String,
    pub sort: SortState<F>,
}

impl<F: Copy + PartialEq> ListOptions<F> {
    pub fn new(query: impl Into<String>, sort: SortState<F>) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    pub fn sorted_by(field: F, direction: SortDirection) -> Self {
        Self::new("", SortState::with_direction(field, direction))
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl<F: Copy + PartialEq + Default> Default for ListOptions<F> {
    /// No filter, default column, descending
    fn default() -> Self {
        Self::new("", SortState::new(F::default()))
    }
}
