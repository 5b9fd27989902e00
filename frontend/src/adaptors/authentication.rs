//! Authentication adaptor.

use crate::actions::AuthAction;
use crate::app::AppStore;
use crate::state::{AppState, AuthenticationState};
use comixed_runtime::{EffectHandle, StoreError, Subscription};

/// Session intents and the authentication slice.
#[derive(Clone)]
pub struct AuthenticationAdaptor {
    store: AppStore,
}

impl AuthenticationAdaptor {
    /// Create an adaptor over `store`.
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Ask the back end who is logged in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn check_state(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::CheckState).await
    }

    /// Store a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn set_token(&self, token: impl Into<String>) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::SetToken {
            token: token.into(),
        })
        .await
    }

    /// Forget the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn clear_token(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::ClearToken).await
    }

    /// Show the login dialog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn show_login(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::ShowLogin).await
    }

    /// Hide the login dialog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn hide_login(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::HideLogin).await
    }

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn logout(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::Logout).await
    }

    /// Save a preference for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn set_preference(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.dispatch(AuthAction::SetPreference {
            name: name.into(),
            value: value.into(),
        })
        .await
    }

    /// Follow the authentication slice.
    pub async fn auth_state<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(AuthenticationState) + Send + Sync + 'static,
    {
        self.store
            .select(|state: &AppState| state.authentication.clone(), on_change)
            .await
    }

    /// Whether a user is currently authenticated.
    pub async fn is_authenticated(&self) -> bool {
        self.store
            .state(|state| state.authentication.authenticated)
            .await
    }

    async fn dispatch(&self, action: AuthAction) -> Result<EffectHandle, StoreError> {
        tracing::debug!(action = action.action_type(), "Authentication intent");
        self.store.send(action.into()).await
    }
}
