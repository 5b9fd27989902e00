//! In-memory collaborators for tests and the demo binary.
//!
//! Every mock is cheap to clone and shares its recorded state between
//! clones, so a test can keep one handle while the component owns another.

pub mod comic;
pub mod ui;
pub mod user;

pub use comic::{ComicCall, InMemoryComicService};
pub use ui::{MapTranslator, Navigation, RecordingNotifier, RecordingRouter, ScriptedConfirmation};
pub use user::InMemoryUserService;
