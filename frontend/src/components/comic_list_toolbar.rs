//! Toolbar above the comic list.

use super::Collaborators;
use crate::adaptors::{ScrapingAdaptor, SelectionAdaptor};
use crate::app::AppStore;
use crate::models::Comic;
use crate::services::{Confirmation, ConfirmationRequest, ConfirmationService, Router, TranslateService};
use comixed_runtime::StoreError;
use std::sync::Arc;

/// Route of the scraping page.
pub const SCRAPING_URL: &str = "/scraping";

/// Comic list toolbar component.
pub struct ComicListToolbar {
    scraping: ScrapingAdaptor,
    selection: SelectionAdaptor,
    confirmation: Arc<dyn ConfirmationService>,
    translate: Arc<dyn TranslateService>,
    router: Arc<dyn Router>,
    selected_comics: Vec<Comic>,
}

impl ComicListToolbar {
    /// Create the toolbar with an empty selection.
    #[must_use]
    pub fn new(store: AppStore, collaborators: &Collaborators) -> Self {
        Self {
            scraping: ScrapingAdaptor::new(store.clone()),
            selection: SelectionAdaptor::new(store),
            confirmation: Arc::clone(&collaborators.confirmation),
            translate: Arc::clone(&collaborators.translate),
            router: Arc::clone(&collaborators.router),
            selected_comics: Vec::new(),
        }
    }

    /// Replace the comics the toolbar acts on.
    pub fn set_selected_comics(&mut self, comics: Vec<Comic>) {
        self.selected_comics = comics;
    }

    /// Comics the toolbar acts on.
    #[must_use]
    pub fn selected_comics(&self) -> &[Comic] {
        &self.selected_comics
    }

    /// Ask for confirmation, then queue the selected comics for scraping,
    /// clear the selection and open the scraping page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn start_scraping(&self) -> Result<Confirmation, StoreError> {
        let request = ConfirmationRequest::new(
            self.translate.instant("library.messages.start-scraping-title"),
            self.translate.instant("library.messages.start-scraping-question"),
        );

        let answer = self.confirmation.confirm(request).await;
        if answer == Confirmation::Declined {
            tracing::debug!("Scraping declined");
            return Ok(answer);
        }

        tracing::info!(comics = self.selected_comics.len(), "Starting scraping");
        self.scraping
            .start_scraping(self.selected_comics.clone())
            .await?;
        self.selection.clear_comic_selections().await?;
        self.router.navigate_by_url(SCRAPING_URL);
        Ok(answer)
    }
}

impl std::fmt::Debug for ComicListToolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComicListToolbar")
            .field("selected_comics", &self.selected_comics.len())
            .finish_non_exhaustive()
    }
}
