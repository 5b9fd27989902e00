//! Actions for every state slice.
//!
//! Each slice has a closed action enum whose variants carry a stable type
//! label (`"[Slice] Verb"`). [`AppAction`] wraps them for the root store.

use crate::models::{Comic, LibraryUpdate, User};
use crate::state::LibraryFilter;
use chrono::{DateTime, Utc};
use comixed_core::action::Action as ActionLabel;
use comixed_macros::Action;
use std::time::Duration;

/// Authentication actions.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Ask the back end who is logged in
    #[action("[Authentication] Check State")]
    CheckState,

    /// The current user was loaded
    #[action("[Authentication] User Loaded")]
    UserLoaded {
        /// Loaded user
        user: User,
    },

    /// Nobody is logged in (or the check failed)
    #[action("[Authentication] No User Loaded")]
    NoUserLoaded,

    /// Store a bearer token
    #[action("[Authentication] Set Token")]
    SetToken {
        /// Token value
        token: String,
    },

    /// Forget the bearer token
    #[action("[Authentication] Clear Token")]
    ClearToken,

    /// Show the login dialog
    #[action("[Authentication] Show Login")]
    ShowLogin,

    /// Hide the login dialog
    #[action("[Authentication] Hide Login")]
    HideLogin,

    /// End the session
    #[action("[Authentication] Logout")]
    Logout,

    /// Save a user preference
    #[action("[Authentication] Set Preference")]
    SetPreference {
        /// Preference name
        name: String,
        /// New value
        value: String,
    },

    /// The preference was saved; carries the updated user
    #[action("[Authentication] Preference Set")]
    PreferenceSet {
        /// User as returned by the back end
        user: User,
    },

    /// The preference could not be saved
    #[action("[Authentication] Set Preference Failed")]
    SetPreferenceFailed,
}

/// Library actions.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum LibraryAction {
    /// Poll for comics changed after `since`
    #[action("[Library] Get Updates")]
    GetUpdates {
        /// Only return comics updated after this date
        since: DateTime<Utc>,
        /// How long the back end may hold the request
        timeout: Duration,
    },

    /// An update poll answered
    #[action("[Library] Updates Received")]
    UpdatesReceived {
        /// Changed comics and counters
        update: LibraryUpdate,
    },

    /// An update poll failed
    #[action("[Library] Get Updates Failed")]
    GetUpdatesFailed,

    /// Keep polling for updates until stopped
    #[action("[Library] Start Polling")]
    StartPolling {
        /// Pause between one answer and the next poll
        interval: Duration,
        /// Timeout sent with every poll
        timeout: Duration,
    },

    /// The pause before the next poll elapsed
    #[action("[Library] Poll Due")]
    PollDue,

    /// Stop scheduling polls
    #[action("[Library] Stop Polling")]
    StopPolling,

    /// Delete a comic from the library
    #[action("[Library] Remove Comic")]
    RemoveComic {
        /// Comic to delete
        comic: Comic,
    },

    /// The comic was deleted
    #[action("[Library] Comic Removed")]
    ComicRemoved {
        /// Deleted comic
        comic: Comic,
    },

    /// The comic could not be deleted
    #[action("[Library] Remove Comic Failed")]
    RemoveComicFailed,

    /// Rescan library files changed after `last_comic_date`
    #[action("[Library] Rescan Files")]
    RescanFiles {
        /// Newest comic date known to the front end
        last_comic_date: DateTime<Utc>,
        /// How long the back end may take to answer
        timeout: Duration,
    },

    /// The rescan was queued
    #[action("[Library] Rescan Started")]
    RescanStarted {
        /// Files queued for rescanning
        rescan_count: u32,
    },

    /// The rescan could not be started
    #[action("[Library] Rescan Failed")]
    RescanFailed,
}

/// Library filter actions.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum LibraryFilterAction {
    /// Replace the filter
    #[action("[Library Filter] Change Filter")]
    ChangeFilter {
        /// New filter
        filter: LibraryFilter,
    },

    /// Restore the default filter
    #[action("[Library Filter] Reset Filter")]
    ResetFilter,
}

/// Comic selection actions.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    /// Add comics to the selection
    #[action("[Selection] Select Comics")]
    SelectComics {
        /// Comics to add
        comics: Vec<Comic>,
    },

    /// Remove comics from the selection
    #[action("[Selection] Deselect Comics")]
    DeselectComics {
        /// Comics to remove
        comics: Vec<Comic>,
    },

    /// Empty the selection
    #[action("[Selection] Clear Selections")]
    ClearSelections,
}

/// Batch scraping actions.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum ScrapingAction {
    /// Prepare a session with the metadata source key
    #[action("[Multiple Comics Scraping] Setup")]
    Setup {
        /// Metadata source key
        api_key: String,
    },

    /// Queue comics for scraping
    #[action("[Multiple Comics Scraping] Start")]
    Start {
        /// Comics to scrape, in order
        comics: Vec<Comic>,
    },

    /// One comic finished scraping
    #[action("[Multiple Comics Scraping] Comic Scraped")]
    ComicScraped {
        /// Finished comic
        comic: Comic,
    },

    /// Abandon the batch
    #[action("[Multiple Comics Scraping] Stop")]
    Stop,
}

/// Root action dispatched through the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Authentication slice
    Authentication(AuthAction),
    /// Library slice
    Library(LibraryAction),
    /// Library filter slice
    LibraryFilter(LibraryFilterAction),
    /// Selection slice
    Selection(SelectionAction),
    /// Scraping slice
    Scraping(ScrapingAction),
}

impl ActionLabel for AppAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::Authentication(action) => action.action_type(),
            Self::Library(action) => action.action_type(),
            Self::LibraryFilter(action) => action.action_type(),
            Self::Selection(action) => action.action_type(),
            Self::Scraping(action) => action.action_type(),
        }
    }
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Authentication(action)
    }
}

impl From<LibraryAction> for AppAction {
    fn from(action: LibraryAction) -> Self {
        Self::Library(action)
    }
}

impl From<LibraryFilterAction> for AppAction {
    fn from(action: LibraryFilterAction) -> Self {
        Self::LibraryFilter(action)
    }
}

impl From<SelectionAction> for AppAction {
    fn from(action: SelectionAction) -> Self {
        Self::Selection(action)
    }
}

impl From<ScrapingAction> for AppAction {
    fn from(action: ScrapingAction) -> Self {
        Self::Scraping(action)
    }
}
