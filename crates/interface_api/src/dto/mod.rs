//! Request and response bodies
//!
//! Request DTOs carry `validator` rules for shape checks; the domain crates
//! still enforce their own rules once the request is converted.

pub mod items;
pub mod claims;

use serde::Deserialize;
use std::str::FromStr;

use core_kernel::{CoreError, SortDirection, SortState};
use gateway::ListOptions;

/// `?q=&sort=&direction=` on list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter
    pub q: Option<String>,
    /// Column name; the list's default column when absent
    pub sort: Option<String>,
    /// `asc` or `desc`; descending when absent
    pub direction: Option<SortDirection>,
}

impl ListQuery {
    /// Converts to gateway list options, rejecting unknown sort columns
    pub fn into_options<F>(self) -> Result<ListOptions<F>, CoreError>
    where
        F: FromStr<Err = CoreError> + Default + Copy + PartialEq,
    {
        let field = match self.sort.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse()?,
            _ => F::default(),
        };
        let sort = SortState::with_direction(field, self.direction.unwrap_or_default());
        Ok(ListOptions::new(self.q.unwrap_or_default(), sort))
    }
}
