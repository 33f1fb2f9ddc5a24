//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod dish;
pub mod favorite;
pub mod municipality;
pub mod restaurant;
pub mod review;
