//! Listing limits and pagination clamps.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future CLI tooling.

/// Default number of entities returned by general listing endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 200;

/// Maximum number of entities a listing endpoint will return.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Default size of the "top dishes" panel widget.
pub const DEFAULT_TOP_DISHES: i64 = 5;

/// Default size of the featured restaurants strip.
pub const DEFAULT_TOP_RESTAURANTS: i64 = 3;

/// Maximum size of any top-N widget.
pub const MAX_TOP_LIMIT: i64 = 20;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
