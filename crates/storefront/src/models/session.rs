//! Session-stored types.
//!
//! The session is the per-device persistence boundary: the logged-in user
//! identity and the cart blob both live in it under fixed keys, written
//! after every mutation and restored on the next request.

use serde::{Deserialize, Serialize};

use ruouvan_core::{Email, Role, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user and
/// their role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub avatar: Option<String>,
}

impl CurrentUser {
    /// Whether this session holds admin privilege.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&crate::models::User> for CurrentUser {
    fn from(user: &crate::models::User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
        }
    }
}

/// Session keys for per-device state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the cart state blob.
    pub const CART: &str = "cart";
}
