use std::sync::Arc;

use tracing::{debug, warn};

use crate::events::{EventBus, SessionEvent};

use super::store::{StoreError, TokenStore};

/// Minimal profile for the authenticated user.
///
/// The API does not yet expose a profile-from-token endpoint, so this is a
/// fixed placeholder derived at login time rather than decoded from the
/// token. Replacing it with real user data is a pending product decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl AuthUser {
    fn placeholder() -> Self {
        Self {
            id: "1".to_string(),
            name: "Usuário Autenticado".to_string(),
            email: "user@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(AuthUser),
}

/// Owns the authenticated/unauthenticated state and coordinates the token
/// store and the event bus.
///
/// Lifecycle: `initialize()` once at startup, then `login`/`logout` cycles
/// for the lifetime of the process. Constructed explicitly and injected into
/// consumers; there are no hidden statics.
pub struct SessionManager {
    store: TokenStore,
    bus: Arc<EventBus>,
    state: SessionState,
    loading: bool,
}

impl SessionManager {
    pub fn new(store: TokenStore, bus: Arc<EventBus>) -> Self {
        Self {
            store,
            bus,
            state: SessionState::Unauthenticated,
            loading: true,
        }
    }

    /// Restore the session from the token store.
    ///
    /// A stored credential yields `Authenticated` with the placeholder
    /// profile; absence or a read failure leaves the session
    /// `Unauthenticated`. Clears the loading flag either way.
    pub async fn initialize(&mut self) {
        match self.store.get().await {
            Ok(Some(_)) => {
                debug!("stored credential found, restoring session");
                self.state = SessionState::Authenticated(AuthUser::placeholder());
            }
            Ok(None) => {
                self.state = SessionState::Unauthenticated;
            }
            Err(e) => {
                // Read failure is treated as "no credential"
                warn!(error = %e, "failed to read token store, treating as unauthenticated");
                self.state = SessionState::Unauthenticated;
            }
        }
        self.loading = false;
    }

    /// Persist the credential and flip to `Authenticated`.
    ///
    /// On persistence failure the error propagates and the state is left
    /// untouched - no partial login.
    pub async fn login(&mut self, token: &str) -> Result<(), StoreError> {
        self.store.set(token).await?;
        self.state = SessionState::Authenticated(AuthUser::placeholder());
        debug!("login completed");
        Ok(())
    }

    /// Clear the credential, flip to `Unauthenticated`, and broadcast the
    /// logout event.
    ///
    /// Fail-open: the in-memory state is cleared and the event published
    /// even when the durable clear fails; the failure still propagates so
    /// the caller can surface it.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.state = SessionState::Unauthenticated;
        let result = self.store.clear().await;
        if let Err(ref e) = result {
            warn!(error = %e, "token clear failed during logout, state cleared anyway");
        }
        self.bus.publish(SessionEvent::Logout);
        result
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self.state {
            SessionState::Authenticated(ref user) => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// True until `initialize()` has completed. Presentation code consults
    /// this to avoid premature login redirects.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
