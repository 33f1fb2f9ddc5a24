//! Centralized permission checks.
//!
//! Every privileged operation funnels through [`authorize`] with a
//! [`Requester`] and an [`Action`], instead of comparing role strings at
//! each call site. The API layer builds the `Requester` from its JWT
//! claims; this module trusts that input and does not re-derive identity.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_MODERATOR, ROLE_OWNER};
use crate::types::DbId;

/// The authenticated identity a permission check runs against.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: DbId,
    /// Role name resolved at authentication time (e.g. `"admin"`).
    pub role: String,
}

impl Requester {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }
}

/// Actions subject to a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Assign or clear curation overlay fields (featured/panel rank).
    CurateEntity,
    /// Create, update, or deactivate directory entities
    /// (municipalities, dishes, restaurants) and their links.
    ManageDirectory,
    /// Delete a review written by the user with the given id.
    DeleteRating { author_id: DbId },
}

/// Check whether `requester` may perform `action`.
///
/// Returns `CoreError::Forbidden` with a description of the missing
/// permission otherwise.
pub fn authorize(requester: &Requester, action: Action) -> Result<(), CoreError> {
    match action {
        Action::CurateEntity => {
            if requester.role == ROLE_ADMIN || requester.role == ROLE_OWNER {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "Curation requires the admin or owner role".into(),
                ))
            }
        }
        Action::ManageDirectory => {
            if requester.role == ROLE_ADMIN {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "Directory management requires the admin role".into(),
                ))
            }
        }
        Action::DeleteRating { author_id } => {
            if requester.user_id == author_id
                || requester.role == ROLE_ADMIN
                || requester.role == ROLE_MODERATOR
            {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "Only the review author or a moderator may delete a review".into(),
                ))
            }
        }
    }
}
