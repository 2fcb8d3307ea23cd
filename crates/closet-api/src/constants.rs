//! API-level constants.

/// Versioned prefix for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Per-entity result cap for the admin global search.
pub const SEARCH_GROUP_LIMIT: usize = 10;

/// Default restock threshold for the low-stock listing.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;
