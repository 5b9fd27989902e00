//! Recording user-interface collaborators.

use crate::services::{Confirmation, ConfirmationRequest, ConfirmationService, Notifier, Router, TranslateService};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Confirmation dialog that always gives the same answer.
#[derive(Debug, Clone)]
pub struct ScriptedConfirmation {
    answer: Arc<Mutex<Confirmation>>,
    requests: Arc<Mutex<Vec<ConfirmationRequest>>>,
}

impl ScriptedConfirmation {
    /// Dialog answering `Accepted`.
    #[must_use]
    pub fn accepting() -> Self {
        Self::answering(Confirmation::Accepted)
    }

    /// Dialog answering `Declined`.
    #[must_use]
    pub fn declining() -> Self {
        Self::answering(Confirmation::Declined)
    }

    /// Dialog answering `answer`.
    #[must_use]
    pub fn answering(answer: Confirmation) -> Self {
        Self {
            answer: Arc::new(Mutex::new(answer)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Change the answer for later requests.
    pub fn set_answer(&self, answer: Confirmation) {
        *self.answer.lock() = answer;
    }

    /// Requests shown so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests.lock().clone()
    }
}

impl ConfirmationService for ScriptedConfirmation {
    fn confirm(&self, request: ConfirmationRequest) -> BoxFuture<'_, Confirmation> {
        self.requests.lock().push(request);
        let answer = *self.answer.lock();
        Box::pin(async move { answer })
    }
}

/// Translator backed by a map. Missing keys come back unchanged.
#[derive(Debug, Clone, Default)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    /// Translator with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }
}

impl TranslateService for MapTranslator {
    fn instant(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Notifier that keeps every toast.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    errors: Arc<Mutex<Vec<String>>>,
    infos: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Notifier with no toasts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Error toasts, oldest first.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// Info toasts, oldest first.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        tracing::debug!(message, "Error toast");
        self.errors.lock().push(message.to_string());
    }

    fn info(&self, message: &str) {
        tracing::debug!(message, "Info toast");
        self.infos.lock().push(message.to_string());
    }
}

/// A navigation recorded by [`RecordingRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// `navigate`
    Commands(Vec<String>),
    /// `navigate_by_url`
    Url(String),
}

/// Router that keeps every navigation.
#[derive(Debug, Clone, Default)]
pub struct RecordingRouter {
    navigations: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingRouter {
    /// Router with no navigations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigations so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations.lock().clone()
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, commands: &[String]) {
        self.navigations.lock().push(Navigation::Commands(commands.to_vec()));
    }

    fn navigate_by_url(&self, url: &str) {
        self.navigations.lock().push(Navigation::Url(url.to_string()));
    }
}
