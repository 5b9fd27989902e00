//! Multiple comics scraping adaptor.

use crate::actions::ScrapingAction;
use crate::app::AppStore;
use crate::models::Comic;
use crate::state::{AppState, MultipleComicsScraping};
use comixed_runtime::{EffectHandle, StoreError, Subscription};

/// Scraping session intents and the scraping slice.
#[derive(Clone)]
pub struct ScrapingAdaptor {
    store: AppStore,
}

impl ScrapingAdaptor {
    /// Create an adaptor over `store`.
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Prepare a session with the metadata source key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn setup(&self, api_key: impl Into<String>) -> Result<EffectHandle, StoreError> {
        self.dispatch(ScrapingAction::Setup {
            api_key: api_key.into(),
        })
        .await
    }

    /// Queue `comics` for scraping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn start_scraping(&self, comics: Vec<Comic>) -> Result<EffectHandle, StoreError> {
        self.dispatch(ScrapingAction::Start { comics }).await
    }

    /// Mark `comic` as scraped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn comic_scraped(&self, comic: Comic) -> Result<EffectHandle, StoreError> {
        self.dispatch(ScrapingAction::ComicScraped { comic }).await
    }

    /// Abandon the batch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn stop(&self) -> Result<EffectHandle, StoreError> {
        self.dispatch(ScrapingAction::Stop).await
    }

    /// Follow the scraping slice.
    pub async fn scraping_state<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(MultipleComicsScraping) + Send + Sync + 'static,
    {
        self.store
            .select(|state: &AppState| state.scraping.clone(), on_change)
            .await
    }

    async fn dispatch(&self, action: ScrapingAction) -> Result<EffectHandle, StoreError> {
        tracing::debug!(action = action.action_type(), "Scraping intent");
        self.store.send(action.into()).await
    }
}
