//! Details panel for a single page.

use super::Collaborators;
use crate::models::{Page, PageType};
use crate::services::{ComicService, Confirmation, ConfirmationRequest, ConfirmationService, Notifier};
use comixed_runtime::metrics::service::record_failure;
use std::sync::Arc;

const DELETE_PAGE_TITLE: &str = "Delete This Page?";
const DELETE_PAGE_MESSAGE: &str = "Are you sure you want to delete this page?";
const UNDELETE_PAGE_TITLE: &str = "Undelete This Page?";
const UNDELETE_PAGE_MESSAGE: &str = "Are you sure you want to undelete this page?";

/// Page details component.
///
/// Service failures are toasted and logged; the local page is only changed
/// after the back end accepted the change.
pub struct PageDetails {
    comics: Arc<dyn ComicService>,
    confirmation: Arc<dyn ConfirmationService>,
    notifier: Arc<dyn Notifier>,
    page: Page,
    page_types: Vec<PageType>,
}

impl PageDetails {
    /// Create the panel for `page`.
    #[must_use]
    pub fn new(page: Page, collaborators: &Collaborators) -> Self {
        Self {
            comics: Arc::clone(&collaborators.comics),
            confirmation: Arc::clone(&collaborators.confirmation),
            notifier: Arc::clone(&collaborators.notifier),
            page,
            page_types: Vec::new(),
        }
    }

    /// Load the page types offered for classification.
    pub async fn init(&mut self) {
        match self.comics.get_page_types().await {
            Ok(page_types) => self.page_types = page_types,
            Err(error) => {
                tracing::error!(%error, "Failed to load page types");
                record_failure("get_page_types");
                self.notifier.error("Unable to retrieve page types");
            },
        }
    }

    /// The page shown.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Page types loaded by [`init`](Self::init).
    #[must_use]
    pub fn page_types(&self) -> &[PageType] {
        &self.page_types
    }

    /// Title: the page filename.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.page.filename
    }

    /// Image location for the page.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.comics.get_image_url_for_id(self.page.id)
    }

    /// Human-readable name of `page_type`.
    #[must_use]
    pub fn display_name_for(&self, page_type: &PageType) -> String {
        self.comics.get_display_name_for_page_type(page_type)
    }

    /// Classify the page.
    pub async fn set_page_type(&mut self, page_type: PageType) {
        match self.comics.set_page_type(self.page.id, page_type.clone()).await {
            Ok(()) => {
                tracing::debug!(page_id = self.page.id, page_type = %page_type.name, "Page type set");
                self.page.page_type = page_type;
            },
            Err(error) => {
                tracing::error!(%error, page_id = self.page.id, "Failed to set page type");
                record_failure("set_page_type");
                self.notifier.error("Unable to set the page type");
            },
        }
    }

    /// Ask for confirmation, then mark the page as deleted.
    pub async fn delete_page(&mut self) -> Confirmation {
        self.change_deleted(true, DELETE_PAGE_TITLE, DELETE_PAGE_MESSAGE).await
    }

    /// Ask for confirmation, then mark the page as not deleted.
    pub async fn undelete_page(&mut self) -> Confirmation {
        self.change_deleted(false, UNDELETE_PAGE_TITLE, UNDELETE_PAGE_MESSAGE).await
    }

    async fn change_deleted(&mut self, deleted: bool, header: &str, message: &str) -> Confirmation {
        let answer = self
            .confirmation
            .confirm(ConfirmationRequest::new(header, message))
            .await;
        if answer == Confirmation::Declined {
            tracing::debug!(page_id = self.page.id, deleted, "Page change declined");
            return answer;
        }

        let result = if deleted {
            self.comics.mark_page_as_deleted(self.page.id).await
        } else {
            self.comics.mark_page_as_undeleted(self.page.id).await
        };

        match result {
            Ok(()) => self.page.deleted = deleted,
            Err(error) => {
                tracing::error!(%error, page_id = self.page.id, deleted, "Failed to change page");
                record_failure(if deleted {
                    "mark_page_as_deleted"
                } else {
                    "mark_page_as_undeleted"
                });
                self.notifier.error(&format!("ERROR: {error}"));
            },
        }
        answer
    }
}

impl std::fmt::Debug for PageDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageDetails")
            .field("page", &self.page)
            .field("page_types", &self.page_types.len())
            .finish_non_exhaustive()
    }
}
