//! Authenticated-session state.
//!
//! Authentication itself is an external collaborator; the engine only needs
//! to know whether a session is active before mutating the ledger.

use std::sync::{RwLock, RwLockReadGuard};

use log::warn;
use serde::{Deserialize, Serialize};

/// An active user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub email: Option<String>,
}

/// Holds the current session, if any.
pub struct SessionStore {
    current: RwLock<Option<UserSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    fn read_current(&self) -> RwLockReadGuard<'_, Option<UserSession>> {
        self.current.read().unwrap_or_else(|poisoned| {
            warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn sign_in(&self, session: UserSession) {
        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        *current = Some(session);
    }

    pub fn sign_out(&self) {
        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        *current = None;
    }

    pub fn current(&self) -> Option<UserSession> {
        self.read_current().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_current().is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
