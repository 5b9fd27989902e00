//! Comic and page operations offered by the library back end.

use super::ServiceFuture;
use crate::models::{LibraryUpdate, PageType};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Comic, page and library operations.
///
/// # Example
///
/// ```ignore
/// let page_types = comics.get_page_types().await?;
/// comics.set_page_type(page.id, page_types[1].clone()).await?;
/// ```
pub trait ComicService: Send + Sync {
    /// All page classifications known to the back end.
    fn get_page_types(&self) -> ServiceFuture<'_, Vec<PageType>>;

    /// Reclassify a page.
    fn set_page_type(&self, page_id: u64, page_type: PageType) -> ServiceFuture<'_, ()>;

    /// Mark a page for removal.
    fn mark_page_as_deleted(&self, page_id: u64) -> ServiceFuture<'_, ()>;

    /// Clear a page's removal mark.
    fn mark_page_as_undeleted(&self, page_id: u64) -> ServiceFuture<'_, ()>;

    /// URL of the page image.
    fn get_image_url_for_id(&self, page_id: u64) -> String;

    /// Human-readable name of a page type.
    fn get_display_name_for_page_type(&self, page_type: &PageType) -> String;

    /// Comics changed after `since`.
    ///
    /// The back end may hold the request open for up to `timeout` waiting
    /// for changes.
    fn get_library_updates(
        &self,
        since: DateTime<Utc>,
        timeout: Duration,
    ) -> ServiceFuture<'_, LibraryUpdate>;

    /// Delete a comic from the library.
    fn remove_comic(&self, comic_id: u64) -> ServiceFuture<'_, ()>;

    /// Queue library files changed after `last_comic_date` for rescanning.
    ///
    /// Returns the number of files queued.
    fn rescan_library(
        &self,
        last_comic_date: DateTime<Utc>,
        timeout: Duration,
    ) -> ServiceFuture<'_, u32>;
}
