//! Offset/limit query parameters for list endpoints.

use serde::Deserialize;

use crate::config::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

/// Listing query parameters (`?skip=0&limit=50`)
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl ListParams {
    /// Get limit capped at the maximum page size
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_LIST_LIMIT)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}
