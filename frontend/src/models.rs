//! Back-end owned data shapes.
//!
//! These mirror the JSON documents the library service returns. The front
//! end never creates them, it only holds and forwards them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named user setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Preference name, e.g. `api_key`
    pub name: String,
    /// Stored value
    pub value: String,
}

impl Preference {
    /// Create a preference.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Authenticated library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Back-end id
    pub id: u64,
    /// Login email
    pub email: String,
    /// First time the user logged in
    pub first_login_date: DateTime<Utc>,
    /// Most recent login
    pub last_login_date: DateTime<Utc>,
    /// Granted role names, e.g. `ADMIN`
    pub roles: Vec<String>,
    /// Ordered preferences; names are unique in practice but not enforced
    pub preferences: Vec<Preference>,
}

impl User {
    /// Whether the user holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the user is a library administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role("ADMIN")
    }
}

/// Classification of a page (story, front cover, advertisement, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageType {
    /// Back-end id
    pub id: u64,
    /// Internal name, e.g. `front-cover`
    pub name: String,
}

/// One image inside a comic archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Back-end id
    pub id: u64,
    /// Owning comic
    pub comic_id: u64,
    /// Entry name inside the archive
    pub filename: String,
    /// Content hash used to find duplicates
    pub hash: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Current classification
    pub page_type: PageType,
    /// Marked for removal on the next consolidation
    pub deleted: bool,
}

/// A comic archive in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    /// Back-end id
    pub id: u64,
    /// Archive path on the server
    pub filename: String,
    /// Publisher name
    pub publisher: Option<String>,
    /// Series name
    pub series: Option<String>,
    /// Volume, usually the starting year
    pub volume: Option<String>,
    /// Issue number as printed
    pub issue_number: Option<String>,
    /// When the comic was imported
    pub added_date: DateTime<Utc>,
    /// Last time the back end changed the comic
    pub last_updated_date: DateTime<Utc>,
    /// Number of pages in the archive
    pub page_count: u32,
}

/// Counters describing background library work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryContents {
    /// Files still queued for rescanning
    pub rescan_count: u32,
    /// Files still queued for import
    pub import_count: u32,
}

/// Answer to a library update poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryUpdate {
    /// Comics added or changed since the requested date
    pub comics: Vec<Comic>,
    /// Files still queued for rescanning
    pub rescan_count: u32,
    /// Files still queued for import
    pub import_count: u32,
}

impl LibraryUpdate {
    /// Most recent `last_updated_date` among the returned comics.
    #[must_use]
    pub fn latest_comic_date(&self) -> Option<DateTime<Utc>> {
        self.comics.iter().map(|comic| comic.last_updated_date).max()
    }
}

/// Field the library list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Import date
    #[default]
    AddedDate,
    /// Series name
    Series,
    /// Publisher name
    Publisher,
    /// Archive filename
    Filename,
}
