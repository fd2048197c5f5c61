//! Session resolution
//!
//! `SessionAuth` starts unresolved and becomes resolved exactly once, either with
//! a user or with nobody signed in. The loader only reads it through
//! [`AuthProvider`].

use crate::repository::contract::AuthProvider;
use crate::repository::HttpContentClient;
use crate::types::{User, UserId};
use async_trait::async_trait;
use futures::future;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SessionState {
    resolved: bool,
    user: Option<User>,
}

/// Watch-channel backed auth provider
pub struct SessionAuth {
    state: watch::Sender<SessionState>,
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::pending()
    }
}

impl SessionAuth {
    /// Session whose resolution is still in progress
    pub fn pending() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    /// Session that is already resolved
    pub fn resolved_with(user: Option<User>) -> Self {
        let auth = Self::pending();
        auth.resolve(user);
        auth
    }

    /// Finish resolution. Later calls replace the user (sign in / sign out).
    pub fn resolve(&self, user: Option<User>) {
        self.state.send_replace(SessionState {
            resolved: true,
            user,
        });
    }

    pub fn sign_out(&self) {
        self.resolve(None);
    }

    /// Resolve the session by asking the API who the configured token belongs to
    ///
    /// Any failure, including a rejected or missing token, resolves to "no user".
    pub async fn verify_token(&self, client: &HttpContentClient) -> Option<User> {
        let user = if client.has_token() {
            match client.get_me().await {
                Ok(user) => {
                    info!(user = %user.username, "Session token verified");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "Failed to verify session token");
                    None
                }
            }
        } else {
            info!("No session token configured");
            None
        };
        self.resolve(user.clone());
        user
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    fn is_resolved(&self) -> bool {
        self.state.borrow().resolved
    }

    fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    async fn resolved(&self) -> Option<User> {
        let mut rx = self.state.subscribe();
        let user = match rx.wait_for(|state| state.resolved).await {
            Ok(state) => state.user.clone(),
            // The sender lives in `self`, so the channel cannot close while we wait
            Err(_) => None,
        };
        user
    }

    async fn user_changed(&self, current: Option<&UserId>) -> Option<User> {
        let mut rx = self.state.subscribe();
        let changed = rx
            .wait_for(|state| state.resolved && state.user.as_ref().map(|u| &u.id) != current)
            .await
            .map(|state| state.user.clone());
        match changed {
            Ok(user) => user,
            // The sender lives in `self`; a closed channel means no further changes
            Err(_) => future::pending().await,
        }
    }
}
