//! Application state slices.
//!
//! Each slice has a fixed initial value (its `Default`), is created with the
//! store and is only ever changed by its reducer.

use crate::models::{Comic, LibraryContents, SortField, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication slice.
///
/// `authenticated` does not imply that `auth_token` and `user` are present;
/// the reducer applies each transition as an unconditional overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationState {
    /// A user check has completed at least once
    pub initialized: bool,
    /// A user check is in flight
    pub authenticating: bool,
    /// The session is considered authenticated
    pub authenticated: bool,
    /// A preference update is in flight
    pub setting_preference: bool,
    /// The login dialog is visible
    pub show_login: bool,
    /// The current user, once loaded
    pub user: Option<User>,
    /// Bearer token for the back end
    pub auth_token: Option<String>,
}

/// Library slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryState {
    /// Every comic known to the front end
    pub comics: Vec<Comic>,
    /// Newest `last_updated_date` received so far; the epoch initially
    pub last_comic_date: DateTime<Utc>,
    /// Background work counters
    pub library_contents: LibraryContents,
    /// An update poll is in flight
    pub fetching_updates: bool,
    /// A comic removal is in flight
    pub removing_comic: bool,
    /// A rescan request is in flight
    pub rescanning: bool,
    /// Set while the library keeps itself up to date
    pub polling: Option<UpdatePolling>,
}

/// Settings of a running update poll loop.
///
/// Every answered or failed poll schedules the next one `interval` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePolling {
    /// Pause between one answer and the next poll
    pub interval: Duration,
    /// Timeout sent with every poll
    pub timeout: Duration,
}

impl LibraryState {
    /// Look up a comic by id.
    #[must_use]
    pub fn comic(&self, id: u64) -> Option<&Comic> {
        self.comics.iter().find(|comic| comic.id == id)
    }
}

/// How the library list is filtered and ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFilter {
    /// Free text matched against series and filename
    pub search_text: String,
    /// Only show this publisher
    pub publisher: Option<String>,
    /// Sort key
    pub sort_field: SortField,
    /// Sort direction
    pub ascending: bool,
    /// Set whenever the filter was changed by an action
    pub changed: bool,
}

impl LibraryFilter {
    /// Whether `comic` passes this filter.
    #[must_use]
    pub fn matches(&self, comic: &Comic) -> bool {
        if let Some(publisher) = &self.publisher {
            if comic.publisher.as_deref() != Some(publisher.as_str()) {
                return false;
            }
        }

        if self.search_text.is_empty() {
            return true;
        }

        let needle = self.search_text.to_lowercase();
        comic.filename.to_lowercase().contains(&needle)
            || comic
                .series
                .as_deref()
                .is_some_and(|series| series.to_lowercase().contains(&needle))
    }
}

/// Comics the user has selected in the library list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected comics, in selection order, unique by id
    pub selected_comics: Vec<Comic>,
}

impl SelectionState {
    /// Whether the comic with `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_comics.iter().any(|comic| comic.id == id)
    }
}

/// Batch metadata scraping session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleComicsScraping {
    /// Key for the metadata source
    pub api_key: String,
    /// Comics are still queued
    pub busy: bool,
    /// Comics waiting to be scraped, front first
    pub comics: Vec<Comic>,
    /// When the current batch started
    pub started_at: Option<DateTime<Utc>>,
}

/// Root state owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Authentication slice
    pub authentication: AuthenticationState,
    /// Library slice
    pub library: LibraryState,
    /// Library filter slice
    pub library_filter: LibraryFilter,
    /// Selection slice
    pub selection: SelectionState,
    /// Scraping slice
    pub scraping: MultipleComicsScraping,
}
