//! Authenticated user snapshot.

use serde::{Deserialize, Serialize};

use quitanda_core::{Email, Role};

/// The user resolved by the identity provider for the current request.
///
/// Authentication mechanics live outside this system; the order pipeline
/// only consumes this already-resolved snapshot and gates admin operations
/// on `role` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: Email,
    pub full_name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may perform admin-only order operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
