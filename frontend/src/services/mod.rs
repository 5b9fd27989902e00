//! Collaborator interfaces.
//!
//! Reducers, effects and components depend on these traits only. Concrete
//! back-end clients live outside this crate; [`crate::mocks`] provides
//! in-memory implementations.
//!
//! Asynchronous methods return boxed futures so every trait stays usable as
//! `Arc<dyn Trait>` inside the environment and components.

use crate::error::ServiceError;
use futures::future::BoxFuture;

pub mod comic;
pub mod ui;
pub mod user;

pub use comic::ComicService;
pub use ui::{Confirmation, ConfirmationRequest, ConfirmationService, Notifier, Router, TranslateService};
pub use user::UserService;

/// Future returned by asynchronous service calls.
pub type ServiceFuture<'a, T> = BoxFuture<'a, Result<T, ServiceError>>;
