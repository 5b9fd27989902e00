//! Stateful view components.
//!
//! Components hold local view fields mirrored from the store, talk to the
//! store only through adaptors, and release every subscription they hold
//! when destroyed or dropped.

pub mod comic_list_toolbar;
pub mod library_page;
pub mod page_details;

pub use comic_list_toolbar::ComicListToolbar;
pub use library_page::{LibraryPage, LibraryPageView};
pub use page_details::PageDetails;

use crate::services::{ComicService, ConfirmationService, Notifier, Router, TranslateService, UserService};
use std::sync::Arc;

/// User-interface collaborators shared by every component.
#[derive(Clone)]
pub struct Collaborators {
    /// Comic back end
    pub comics: Arc<dyn ComicService>,
    /// User back end
    pub users: Arc<dyn UserService>,
    /// Confirmation dialogs
    pub confirmation: Arc<dyn ConfirmationService>,
    /// Message lookup
    pub translate: Arc<dyn TranslateService>,
    /// Toasts
    pub notifier: Arc<dyn Notifier>,
    /// Navigation
    pub router: Arc<dyn Router>,
}
