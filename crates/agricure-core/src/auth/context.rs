//! Current-user context shared with front-ends.

use tokio::sync::watch;

use crate::models::AuthUser;

/// Holds the signed-in user and notifies subscribers on change.
///
/// Passed explicitly to whatever needs it; there is no global session.
#[derive(Clone)]
pub struct SessionContext {
    tx: watch::Sender<Option<AuthUser>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Context that starts signed in.
    pub fn with_user(user: AuthUser) -> Self {
        let (tx, _rx) = watch::channel(Some(user));
        Self { tx }
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Replace the current user; `None` signs out.
    pub fn set_user(&self, user: Option<AuthUser>) {
        self.tx.send_replace(user);
    }

    /// Receiver that observes every later change.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
