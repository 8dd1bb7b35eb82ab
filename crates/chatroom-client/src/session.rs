//! Sign-in state.
//!
//! An [`IdentityProvider`] owns authentication and publishes its state on a
//! `watch` channel. The [`SessionHolder`] mirrors that state for the client
//! and starts out as [`AuthState::Loading`] until the provider has reported
//! once.

use std::future::Future;

use tokio::sync::watch;
use tracing::info;

use chatroom_shared::{Identity, UserId};

use crate::config::ClientConfig;
use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

/// External authentication seam.
pub trait IdentityProvider: Send + Sync + 'static {
    fn sign_in(&self) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// State-change notifications. The current value is always readable.
    fn subscribe(&self) -> watch::Receiver<AuthState>;
}

/// Provider backed by a locally configured profile. Signing in always
/// succeeds once a user id is configured.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    profile: Option<Identity>,
    state: watch::Sender<AuthState>,
}

impl LocalIdentityProvider {
    pub fn new(profile: Option<Identity>) -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self { profile, state }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let profile = config.user_id.as_ref().map(|uid| Identity {
            uid: UserId::new(uid.clone()),
            display_name: config.display_name.clone(),
            avatar_url: config.avatar_url.clone(),
        });
        Self::new(profile)
    }
}

impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> Result<Identity, AuthError> {
        let identity = self.profile.clone().ok_or(AuthError::NoProfile)?;
        info!(user = %identity.uid, "Signed in");
        self.state.send_replace(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        info!("Signed out");
        self.state.send_replace(AuthState::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

/// Client-side mirror of the provider's auth state.
#[derive(Debug)]
pub struct SessionHolder {
    rx: watch::Receiver<AuthState>,
    current: AuthState,
}

impl SessionHolder {
    pub fn new(mut rx: watch::Receiver<AuthState>) -> Self {
        // report the provider's present state as the first change
        rx.mark_changed();
        Self {
            rx,
            current: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.current
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.identity()
    }

    pub fn is_loading(&self) -> bool {
        self.current == AuthState::Loading
    }

    /// Take a pending state change without waiting.
    pub fn poll_change(&mut self) -> Option<AuthState> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        let state = self.rx.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }

    /// Wait for the next state change. `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        let state = self.rx.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Identity {
        Identity {
            uid: UserId::new("ada"),
            display_name: Some("Ada Lovelace".into()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_holder_starts_loading_then_follows_provider() {
        let provider = LocalIdentityProvider::new(Some(ada()));
        let mut session = SessionHolder::new(provider.subscribe());
        assert!(session.is_loading());

        assert_eq!(session.changed().await, Some(AuthState::SignedOut));
        assert!(session.identity().is_none());

        provider.sign_in().await.unwrap();
        assert_eq!(session.changed().await, Some(AuthState::SignedIn(ada())));
        assert_eq!(session.identity().unwrap().uid.as_str(), "ada");

        provider.sign_out().await.unwrap();
        assert_eq!(session.changed().await, Some(AuthState::SignedOut));
    }

    #[tokio::test]
    async fn test_sign_in_without_profile_fails() {
        let provider = LocalIdentityProvider::new(None);
        assert_eq!(provider.sign_in().await, Err(AuthError::NoProfile));
        assert_eq!(*provider.subscribe().borrow(), AuthState::SignedOut);
    }

    #[test]
    fn test_profile_from_config() {
        let config = ClientConfig {
            user_id: Some("grace".into()),
            display_name: Some("Grace".into()),
            ..Default::default()
        };
        let provider = LocalIdentityProvider::from_config(&config);
        assert_eq!(provider.profile.unwrap().uid.as_str(), "grace");
    }
}
