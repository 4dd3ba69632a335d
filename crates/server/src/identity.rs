//! Identity provider boundary.
//!
//! Authentication happens outside this system. Requests carry an opaque
//! bearer token and the provider resolves it to an already-authenticated
//! [`CurrentUser`] (or nothing). The order pipeline never inspects tokens
//! itself and gates admin operations on the resolved role alone.

use std::collections::HashMap;

use async_trait::async_trait;

use quitanda_core::{Email, Role};

use crate::models::CurrentUser;

/// Resolves bearer tokens to authenticated users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve `token` to the current user, or `None` when unauthenticated.
    async fn current_user(&self, token: &str) -> Option<CurrentUser>;
}

/// Token table provider.
///
/// Backed by a fixed map seeded at startup (from configuration) or by tests.
#[derive(Default)]
pub struct StaticIdentityProvider {
    users: HashMap<String, CurrentUser>,
}

impl StaticIdentityProvider {
    /// Create an empty provider (every request is unauthenticated).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user under a token. Builder-style for seeding.
    #[must_use]
    pub fn with_user(mut self, token: impl Into<String>, user: CurrentUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }

    /// Convenience for seeding an admin account.
    #[must_use]
    pub fn with_admin(self, token: impl Into<String>, email: Email, full_name: String) -> Self {
        self.with_user(
            token,
            CurrentUser {
                email,
                full_name,
                role: Role::Admin,
            },
        )
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self, token: &str) -> Option<CurrentUser> {
        self.users.get(token).cloned()
    }
}
