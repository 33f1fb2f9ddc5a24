//! Well-known role name constants.
//!
//! These must match the seed data in `20260701000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_USER: &str = "user";

/// All seeded role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_OWNER, ROLE_MODERATOR, ROLE_USER];

/// Check whether a role name is one of the seeded roles.
pub fn is_known_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
