//! Current-user session access
//!
//! One injected accessor instead of every screen re-reading persisted
//! session state on its own. Hosts with richer session storage implement
//! [`SessionProvider`] themselves; [`StaticSession`] covers the common case
//! of a session resolved once at startup.

use serde::{Deserialize, Serialize};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// Access to the current session
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<UserInfo>;
}

/// Fixed in-memory session
#[derive(Debug, Clone)]
pub struct StaticSession {
    user: Option<UserInfo>,
}

impl StaticSession {
    pub fn new(user: UserInfo) -> Self {
        Self { user: Some(user) }
    }

    /// Session with nobody signed in
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserInfo> {
        self.user.clone()
    }
}
