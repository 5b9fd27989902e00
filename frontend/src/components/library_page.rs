//! Library page.
//!
//! Mirrors the authentication, library, filter, scraping and selection
//! slices into a [`LibraryPageView`] and turns user intents (delete, rescan,
//! open) into adaptor calls, asking for confirmation where the action is
//! destructive.

use super::Collaborators;
use crate::adaptors::{AuthenticationAdaptor, LibraryAdaptor, ScrapingAdaptor, SelectionAdaptor};
use crate::app::AppStore;
use crate::config::FrontendConfig;
use crate::models::{Comic, User};
use crate::services::{Confirmation, ConfirmationRequest, ConfirmationService, Router, TranslateService, UserService};
use crate::state::{LibraryFilter, LibraryState, MultipleComicsScraping, SelectionState};
use chrono::{DateTime, Utc};
use comixed_runtime::{EffectHandle, StoreError, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const CONFIRMATION_ICON: &str = "fa fa-exclamation";

/// Local view fields of the library page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPageView {
    /// Logged-in user
    pub user: Option<User>,
    /// Last library slice received
    pub library: Option<LibraryState>,
    /// Comics shown on the page
    pub comics: Vec<Comic>,
    /// Filter applied to the page
    pub filter: Option<LibraryFilter>,
    /// Last scraping slice received
    pub scraping: Option<MultipleComicsScraping>,
    /// Last selection slice received
    pub selection: Option<SelectionState>,
    /// Comics currently selected
    pub selected_comics: Vec<Comic>,
}

/// Library page component.
pub struct LibraryPage {
    auth: AuthenticationAdaptor,
    library: LibraryAdaptor,
    scraping: ScrapingAdaptor,
    selection: SelectionAdaptor,
    users: Arc<dyn UserService>,
    confirmation: Arc<dyn ConfirmationService>,
    translate: Arc<dyn TranslateService>,
    router: Arc<dyn Router>,
    api_key_preference: String,
    rescan_timeout: Duration,
    view: Arc<Mutex<LibraryPageView>>,
    subscriptions: Vec<Subscription>,
}

impl LibraryPage {
    /// Create the page. Nothing is subscribed until [`init`](Self::init).
    #[must_use]
    pub fn new(store: AppStore, collaborators: &Collaborators, config: &FrontendConfig) -> Self {
        Self {
            auth: AuthenticationAdaptor::new(store.clone()),
            library: LibraryAdaptor::new(store.clone()),
            scraping: ScrapingAdaptor::new(store.clone()),
            selection: SelectionAdaptor::new(store),
            users: Arc::clone(&collaborators.users),
            confirmation: Arc::clone(&collaborators.confirmation),
            translate: Arc::clone(&collaborators.translate),
            router: Arc::clone(&collaborators.router),
            api_key_preference: config.api_key_preference.clone(),
            rescan_timeout: config.rescan_timeout,
            view: Arc::new(Mutex::new(LibraryPageView::default())),
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe to the store and prepare the scraping session.
    ///
    /// Calling `init` again first releases the previous subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down when the scraping session is prepared.
    pub async fn init(&mut self) -> Result<(), StoreError> {
        self.subscriptions.clear();

        let view = Arc::clone(&self.view);
        let auth = self
            .auth
            .auth_state(move |state| view.lock().user = state.user)
            .await;
        self.subscriptions.push(auth);

        let view = Arc::clone(&self.view);
        let library = self
            .library
            .library_state(move |state| {
                let mut view = view.lock();
                view.comics = state.comics.clone();
                view.library = Some(state);
            })
            .await;
        self.subscriptions.push(library);

        let view = Arc::clone(&self.view);
        let filter = self
            .library
            .filter(move |filter| {
                let mut view = view.lock();
                if view.filter.is_none() || filter.changed {
                    view.filter = Some(filter);
                }
            })
            .await;
        self.subscriptions.push(filter);

        let view = Arc::clone(&self.view);
        let scraping = self
            .scraping
            .scraping_state(move |state| view.lock().scraping = Some(state))
            .await;
        self.subscriptions.push(scraping);

        let api_key = self.users.get_user_preference(&self.api_key_preference, "");
        self.scraping.setup(api_key).await?;

        let view = Arc::clone(&self.view);
        let selection = self
            .selection
            .selection_state(move |state| {
                let mut view = view.lock();
                view.selected_comics = state.selected_comics.clone();
                view.selection = Some(state);
            })
            .await;
        self.subscriptions.push(selection);

        tracing::debug!(subscriptions = self.subscriptions.len(), "Library page initialized");
        Ok(())
    }

    /// Release every subscription. The view keeps its last values.
    pub fn destroy(&mut self) {
        tracing::debug!(subscriptions = self.subscriptions.len(), "Library page destroyed");
        self.subscriptions.clear();
    }

    /// Snapshot of the view fields.
    #[must_use]
    pub fn view(&self) -> LibraryPageView {
        self.view.lock().clone()
    }

    /// Number of subscriptions currently held.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether a rescan may be requested: nothing is queued for rescanning
    /// or importing. False until the library slice has been received.
    #[must_use]
    pub fn can_rescan(&self) -> bool {
        self.view.lock().library.as_ref().is_some_and(|library| {
            library.library_contents.rescan_count == 0 && library.library_contents.import_count == 0
        })
    }

    /// Ask for confirmation, then delete `comic`.
    ///
    /// Returns `None` when the user declined.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn delete_comic(&self, comic: Comic) -> Result<Option<EffectHandle>, StoreError> {
        let request = self.request(
            "library.messages.delete-comic-title",
            "library.messages.delete-comic-question",
        );

        match self.confirmation.confirm(request).await {
            Confirmation::Accepted => {
                tracing::info!(comic_id = comic.id, "Deleting comic");
                self.library.remove_comic(comic).await.map(Some)
            },
            Confirmation::Declined => {
                tracing::debug!(comic_id = comic.id, "Comic deletion declined");
                Ok(None)
            },
        }
    }

    /// Ask for confirmation, then rescan files changed after the newest
    /// comic known to the page.
    ///
    /// Returns `None` when the user declined.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn rescan_library(&self) -> Result<Option<EffectHandle>, StoreError> {
        let request = self.request(
            "library.messages.rescan-library-title",
            "library.messages.rescan-library-message",
        );

        match self.confirmation.confirm(request).await {
            Confirmation::Accepted => {
                let last_comic_date = self
                    .view
                    .lock()
                    .library
                    .as_ref()
                    .map_or_else(DateTime::<Utc>::default, |library| library.last_comic_date);
                tracing::info!(%last_comic_date, "Rescanning library");
                self.library
                    .rescan_files(last_comic_date, self.rescan_timeout)
                    .await
                    .map(Some)
            },
            Confirmation::Declined => {
                tracing::debug!("Library rescan declined");
                Ok(None)
            },
        }
    }

    /// Navigate to the reader for `comic`.
    pub fn open_comic(&self, comic: &Comic) {
        self.router
            .navigate(&["comics".to_string(), comic.id.to_string()]);
    }

    fn request(&self, header_key: &str, message_key: &str) -> ConfirmationRequest {
        ConfirmationRequest::new(
            self.translate.instant(header_key),
            self.translate.instant(message_key),
        )
        .with_icon(CONFIRMATION_ICON)
    }
}

impl std::fmt::Debug for LibraryPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryPage")
            .field("subscriptions", &self.subscriptions.len())
            .field("rescan_timeout", &self.rescan_timeout)
            .finish_non_exhaustive()
    }
}
