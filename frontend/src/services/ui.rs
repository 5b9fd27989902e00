//! User-interface collaborators: confirmation dialogs, translations, toasts
//! and routing.

use futures::future::BoxFuture;

/// Content of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Dialog title
    pub header: String,
    /// Question asked
    pub message: String,
    /// Icon class, e.g. `fa fa-exclamation`
    pub icon: Option<String>,
}

impl ConfirmationRequest {
    /// Create a request without an icon.
    #[must_use]
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
            icon: None,
        }
    }

    /// Set the icon class.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// The user's answer to a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user accepted
    Accepted,
    /// The user declined or dismissed the dialog
    Declined,
}

/// Asks the user to confirm a destructive operation.
pub trait ConfirmationService: Send + Sync {
    /// Show the dialog and wait for the answer.
    fn confirm(&self, request: ConfirmationRequest) -> BoxFuture<'_, Confirmation>;
}

/// Resolves translation keys.
pub trait TranslateService: Send + Sync {
    /// Translation for `key`; a missing key is returned unchanged.
    fn instant(&self, key: &str) -> String;
}

/// Shows toast notifications.
pub trait Notifier: Send + Sync {
    /// Show an error toast.
    fn error(&self, message: &str);

    /// Show an informational toast.
    fn info(&self, message: &str);
}

/// Moves between application views.
pub trait Router: Send + Sync {
    /// Navigate by route segments, e.g. `["comics", "17"]`.
    fn navigate(&self, commands: &[String]);

    /// Navigate to an absolute URL, e.g. `/scraping`.
    fn navigate_by_url(&self, url: &str);
}
