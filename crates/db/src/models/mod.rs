//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod dish;
pub mod favorite;
pub mod municipality;
pub mod rating;
pub mod restaurant;
pub mod role;
pub mod session;
pub mod user;
