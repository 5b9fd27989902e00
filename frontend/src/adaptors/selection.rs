//! Selection adaptor.

use crate::actions::SelectionAction;
use crate::app::AppStore;
use crate::models::Comic;
use crate::state::{AppState, SelectionState};
use comixed_runtime::{EffectHandle, StoreError, Subscription};

/// Comic selection intents and the selection slice.
#[derive(Clone)]
pub struct SelectionAdaptor {
    store: AppStore,
}

impl SelectionAdaptor {
    /// Create an adaptor over `store`.
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Add `comics` to the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_comics(&self, comics: Vec<Comic>) -> Result<EffectHandle, StoreError> {
        self.dispatch(SelectionAction::SelectComics { comics }).await
    }

    /// Remove `comics` from the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn deselect_comics(&self, comics: Vec<Comic>) -> Result<EffectHandle, StoreError> {
        self.dispatch(SelectionAction::DeselectComics { comics }).await
    }

    /// Empty the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn clear_comic_selections(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(SelectionAction::ClearSelections).await
    }

    /// Follow the selection slice.
    pub async fn selection_state<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(SelectionState) + Send + Sync + 'static,
    {
        self.store
            .select(|state: &AppState| state.selection.clone(), on_change)
            .await
    }

    async fn dispatch(&self, action: SelectionAction) -> Result<EffectHandle, StoreError> {
        tracing::debug!(action = action.action_type(), "Selection intent");
        self.store.send(action.into()).await
    }
}
