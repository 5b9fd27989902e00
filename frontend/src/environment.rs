//! Environment injected into every reducer.

use crate::services::{ComicService, Notifier, UserService};
use comixed_core::environment::Clock;
use std::sync::Arc;

/// Collaborators reducers need to build effects.
///
/// Cloning is cheap: every field is shared.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Comic and library back end
    pub comics: Arc<dyn ComicService>,

    /// User session back end
    pub users: Arc<dyn UserService>,

    /// Toasts for failed effects
    pub notifier: Arc<dyn Notifier>,

    /// Time source for timestamps recorded in state
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Create an environment.
    #[must_use]
    pub fn new(
        comics: Arc<dyn ComicService>,
        users: Arc<dyn UserService>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comics,
            users,
            notifier,
            clock,
        }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
