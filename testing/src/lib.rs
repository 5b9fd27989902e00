//! # ComixEd Testing
//!
//! Testing utilities for the ComixEd front-end state architecture.
//!
//! This crate provides:
//! - Deterministic clocks
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - [`ActionRecorder`], which captures every action a store reduces
//! - A tracing initializer for noisy test runs
//!
//! ## Example
//!
//! ```ignore
//! use comixed_testing::{test_clock, ActionRecorder};
//!
//! #[tokio::test]
//! async fn test_check_state_loads_user() {
//!     let store = build_store(environment_with(test_clock()), &FrontendConfig::default());
//!     let mut recorder = ActionRecorder::attach(&store);
//!
//!     store.send(AuthAction::CheckState.into()).await?;
//!
//!     let first = recorder.next().await.map(|action| action.action_type());
//!     assert_eq!(first, Some("[Authentication] Check State"));
//! }
//! ```

use chrono::{DateTime, Utc};
use comixed_core::environment::Clock;

pub mod recorder;
pub mod reducer_test;

/// Test doubles for core collaborator traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Clock frozen at one instant
    ///
    /// `now()` never moves.
    ///
    /// # Example
    ///
    /// ```
    /// use comixed_testing::mocks::FixedClock;
    /// use comixed_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Clock frozen at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2024-03-01 12:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::from_timestamp(1_709_294_400, 0).unwrap_or_default(),
        )
    }
}

/// Reducer assertions and helpers.
pub mod helpers {
    /// Install a compact `tracing` subscriber honoring `RUST_LOG`
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .compact()
            .try_init();
    }
}

pub use helpers::init_test_tracing;
pub use mocks::{test_clock, FixedClock};
pub use recorder::ActionRecorder;
pub use reducer_test::{assertions, ReducerTest};
