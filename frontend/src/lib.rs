//! # ComixEd Front End
//!
//! State core of the comic library front end.
//!
//! One [`AppStore`] owns every state slice. Components talk to it through
//! adaptors; reducers describe service calls as effects and the store feeds
//! their outcome back as actions.
//!
//! ```text
//! Component → Adaptor → send(AppAction) → AppReducer → Effects → services
//!     ↑                                        │
//!     └──────── select(projection) ◄───────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use comixed_frontend::adaptors::AuthenticationAdaptor;
//! use comixed_frontend::mocks::{InMemoryComicService, InMemoryUserService, RecordingNotifier};
//! use comixed_frontend::{build_store, fixtures, AppEnvironment, FrontendConfig};
//! use comixed_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), comixed_runtime::StoreError> {
//! let environment = AppEnvironment::new(
//!     Arc::new(InMemoryComicService::new()),
//!     Arc::new(InMemoryUserService::new().with_user(fixtures::user_admin())),
//!     Arc::new(RecordingNotifier::new()),
//!     Arc::new(SystemClock),
//! );
//! let store = build_store(environment, &FrontendConfig::default());
//!
//! let auth = AuthenticationAdaptor::new(store.clone());
//! auth.check_state().await?.wait().await;
//! assert!(auth.is_authenticated().await);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod actions;
pub mod adaptors;
pub mod app;
pub mod components;
pub mod config;
pub mod effects;
pub mod environment;
pub mod error;
pub mod fixtures;
pub mod mocks;
pub mod models;
pub mod pipes;
pub mod reducers;
pub mod services;
pub mod state;

pub use actions::{AppAction, AuthAction, LibraryAction, LibraryFilterAction, ScrapingAction, SelectionAction};
pub use app::{build_store, AppStore};
pub use config::FrontendConfig;
pub use environment::AppEnvironment;
pub use error::{ConfigError, Result, ServiceError};
pub use reducers::AppReducer;
pub use state::AppState;
