//! Library adaptor.

use crate::actions::{LibraryAction, LibraryFilterAction};
use crate::app::AppStore;
use crate::models::Comic;
use crate::state::{AppState, LibraryFilter, LibraryState};
use chrono::{DateTime, Utc};
use comixed_runtime::{EffectHandle, StoreError, Subscription};
use std::time::Duration;

/// Library intents plus the library and filter slices.
#[derive(Clone)]
pub struct LibraryAdaptor {
    store: AppStore,
}

impl LibraryAdaptor {
    /// Create an adaptor over `store`.
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Poll for comics changed after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn get_updates(
        &self,
        since: DateTime<Utc>,
        timeout: Duration,
    ) -> Result<EffectHandle, StoreError> {
        self.dispatch(LibraryAction::GetUpdates { since, timeout }).await
    }

    /// Poll now, then again `interval` after every answer until
    /// [`stop_polling`](Self::stop_polling).
    ///
    /// A pending poll keeps [`Store::shutdown`](comixed_runtime::Store::shutdown)
    /// waiting for up to `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn start_polling(
        &self,
        interval: Duration,
        timeout: Duration,
    ) -> Result<EffectHandle, StoreError> {
        self.dispatch(LibraryAction::StartPolling { interval, timeout }).await
    }

    /// Stop scheduling update polls. A poll already in flight still lands.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn stop_polling(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(LibraryAction::StopPolling).await
    }

    /// Delete `comic` from the library.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn remove_comic(&self, comic: Comic) -> Result<EffectHandle, StoreError> {
        self.dispatch(LibraryAction::RemoveComic { comic }).await
    }

    /// Rescan library files changed after `last_comic_date`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn rescan_files(
        &self,
        last_comic_date: DateTime<Utc>,
        timeout: Duration,
    ) -> Result<EffectHandle, StoreError> {
        self.dispatch(LibraryAction::RescanFiles {
            last_comic_date,
            timeout,
        })
        .await
    }

    /// Replace the library filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn change_filter(&self, filter: LibraryFilter) -> Result<EffectHandle, StoreError> {
        let action = LibraryFilterAction::ChangeFilter { filter };
        tracing::debug!(action = action.action_type(), "Library filter intent");
        self.store.send(action.into()).await
    }

    /// Restore the default library filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn reset_filter(&self) -> Result<EffectHandle, StoreError> {
        let action = LibraryFilterAction::ResetFilter;
        tracing::debug!(action = action.action_type(), "Library filter intent");
        self.store.send(action.into()).await
    }

    /// Follow the library slice.
    pub async fn library_state<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(LibraryState) + Send + Sync + 'static,
    {
        self.store
            .select(|state: &AppState| state.library.clone(), on_change)
            .await
    }

    /// Follow the library filter.
    pub async fn filter<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(LibraryFilter) + Send + Sync + 'static,
    {
        self.store
            .select(|state: &AppState| state.library_filter.clone(), on_change)
            .await
    }

    async fn dispatch(&self, action: LibraryAction) -> Result<EffectHandle, StoreError> {
        tracing::debug!(action = action.action_type(), "Library intent");
        self.store.send(action.into()).await
    }
}
