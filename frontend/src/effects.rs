//! Effect builders for service-backed actions.
//!
//! Every builder calls one collaborator and maps the outcome to a follow-up
//! action. Failures are logged, counted, surfaced as a toast where the user
//! needs to know, and turned into the slice's `*Failed` action. They are
//! never propagated.

use crate::actions::{AuthAction, LibraryAction};
use crate::environment::AppEnvironment;
use crate::error::ServiceError;
use crate::models::Comic;
use chrono::{DateTime, Utc};
use comixed_core::async_effect;
use comixed_core::effect::Effect;
use comixed_runtime::metrics::service::record_failure;
use std::time::Duration;

/// Load the logged-in user.
///
/// `Unauthorized` is the normal answer for an anonymous visitor and is not
/// toasted.
pub fn load_current_user(env: &AppEnvironment) -> Effect<AuthAction> {
    let users = env.users.clone();
    let notifier = env.notifier.clone();

    async_effect! {
        match users.load_current_user().await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = user.id, "Current user loaded");
                Some(AuthAction::UserLoaded { user })
            },
            Ok(None) | Err(ServiceError::Unauthorized) => {
                tracing::debug!("No user is logged in");
                Some(AuthAction::NoUserLoaded)
            },
            Err(error) => {
                tracing::error!(%error, "Failed to load the current user");
                record_failure("load_current_user");
                notifier.error(&format!("Unable to load the current user: {error}"));
                Some(AuthAction::NoUserLoaded)
            },
        }
    }
}

/// Save a preference for the logged-in user.
pub fn set_user_preference(env: &AppEnvironment, name: String, value: String) -> Effect<AuthAction> {
    let users = env.users.clone();
    let notifier = env.notifier.clone();

    async_effect! {
        match users.set_user_preference(name.clone(), value).await {
            Ok(user) => Some(AuthAction::PreferenceSet { user }),
            Err(error) => {
                tracing::error!(%error, preference = %name, "Failed to save preference");
                record_failure("set_user_preference");
                notifier.error(&format!("Unable to save preference {name}"));
                Some(AuthAction::SetPreferenceFailed)
            },
        }
    }
}

/// End the session on the back end.
pub fn logout(env: &AppEnvironment) -> Effect<AuthAction> {
    let users = env.users.clone();

    async_effect! {
        if let Err(error) = users.logout().await {
            tracing::warn!(%error, "Logout request failed");
            record_failure("logout");
        }
        None
    }
}

/// Poll for comics changed after `since`.
pub fn get_library_updates(
    env: &AppEnvironment,
    since: DateTime<Utc>,
    timeout: Duration,
) -> Effect<LibraryAction> {
    let comics = env.comics.clone();

    async_effect! {
        match comics.get_library_updates(since, timeout).await {
            Ok(update) => {
                tracing::debug!(comics = update.comics.len(), "Library updates received");
                Some(LibraryAction::UpdatesReceived { update })
            },
            Err(error) => {
                tracing::warn!(%error, "Failed to get library updates");
                record_failure("get_library_updates");
                Some(LibraryAction::GetUpdatesFailed)
            },
        }
    }
}

/// Delete `comic` from the library.
pub fn remove_comic(env: &AppEnvironment, comic: Comic) -> Effect<LibraryAction> {
    let comics = env.comics.clone();
    let notifier = env.notifier.clone();

    async_effect! {
        match comics.remove_comic(comic.id).await {
            Ok(()) => {
                tracing::info!(comic_id = comic.id, "Comic removed");
                Some(LibraryAction::ComicRemoved { comic })
            },
            Err(error) => {
                tracing::error!(%error, comic_id = comic.id, "Failed to remove comic");
                record_failure("remove_comic");
                notifier.error(&format!("Unable to delete {}", comic.filename));
                Some(LibraryAction::RemoveComicFailed)
            },
        }
    }
}

/// Queue a rescan of library files changed after `last_comic_date`.
pub fn rescan_library(
    env: &AppEnvironment,
    last_comic_date: DateTime<Utc>,
    timeout: Duration,
) -> Effect<LibraryAction> {
    let comics = env.comics.clone();
    let notifier = env.notifier.clone();

    async_effect! {
        match comics.rescan_library(last_comic_date, timeout).await {
            Ok(rescan_count) => {
                tracing::info!(rescan_count, "Library rescan started");
                Some(LibraryAction::RescanStarted { rescan_count })
            },
            Err(error) => {
                tracing::error!(%error, "Failed to start library rescan");
                record_failure("rescan_library");
                notifier.error("Unable to rescan the library");
                Some(LibraryAction::RescanFailed)
            },
        }
    }
}
