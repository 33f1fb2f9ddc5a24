//! Pure domain logic for the Kusina food directory.
//!
//! This crate has no internal dependencies so it can be used by the DB
//! layer, the API layer, and any future CLI tooling alike.

pub mod error;
pub mod listing;
pub mod permissions;
pub mod ranking;
pub mod rating;
pub mod roles;
pub mod slug;
pub mod types;
