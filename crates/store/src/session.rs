use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use model::VoterId;

use crate::{Identity, Result};

/// In-memory session registry.
///
/// Tokens are opaque to callers; possession of a live token is the only
/// accepted proof of identity. An unknown or revoked token resolves to
/// nothing, which callers surface as an unauthenticated voter.
pub struct SessionTable {
    sessions: DashMap<Box<str>, VoterId>,
    serial: AtomicU64,
}

impl SessionTable {
    pub fn new() -> Self {
        Self { sessions: DashMap::new(), serial: AtomicU64::new(0) }
    }

    /// Issues a fresh token bound to the voter.
    pub fn issue(&self, voter: VoterId) -> Box<str> {
        let serial = self.serial.fetch_add(1, Ordering::Relaxed);
        let token = hex::encode([serial.to_be_bytes(), voter.get().to_be_bytes()].concat()).into_boxed_str();
        self.sessions.insert(token.clone(), voter);
        token
    }

    /// Invalidates a token. Returns whether it was live.
    pub fn revoke(&self, session: &str) -> bool {
        self.sessions.remove(session).is_some()
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Identity for SessionTable {
    async fn resolve(&self, session: &str) -> Result<Option<VoterId>> {
        Ok(self.sessions.get(session).map(|voter| *voter))
    }
}
