//! # ComixEd Core
//!
//! Core traits and types for the ComixEd front-end state architecture.
//!
//! The library front-end keeps every piece of shared UI state in a single
//! typed store. This crate defines the vocabulary that store speaks:
//!
//! - **State**: one plain struct per slice (authentication, library, ...)
//! - **Action**: a closed enum of everything that can happen to a slice
//! - **Reducer**: `(State, Action, Environment) → Effects`, mutating state in place
//! - **Effect**: a description of asynchronous work (service calls) whose
//!   outcome is fed back into the store as another action
//! - **Environment**: injected collaborators (services, clock)
//!
//! ## Example
//!
//! ```ignore
//! use comixed_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct LoginState {
//!     show_login: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum LoginAction {
//!     ShowLogin,
//!     HideLogin,
//! }
//!
//! impl Reducer for LoginReducer {
//!     type State = LoginState;
//!     type Action = LoginAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut LoginState,
//!         action: LoginAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<LoginAction>; 4]> {
//!         match action {
//!             LoginAction::ShowLogin => state.show_login = true,
//!             LoginAction::HideLogin => state.show_login = false,
//!         }
//!         SmallVec::new()
//!     }
//! }
//! ```

pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub use action::Action;
pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer composition (combining and scoping)
pub mod composition;

/// Declarative macros for building effects
pub mod effect_macros;

/// Typed messages sent to a store
///
/// Every slice owns a closed enum of actions. The `Action` trait adds the one
/// piece of metadata the runtime needs for logging and metrics: a stable,
/// human-readable type label such as `"[Authentication] Set Token"`.
///
/// The label is normally generated with `#[derive(Action)]` from the
/// `comixed-macros` crate.
pub mod action {
    /// A message that can be sent to a store
    pub trait Action: Clone + std::fmt::Debug + Send + 'static {
        /// Stable type label for this action, used in logs and metrics
        fn action_type(&self) -> &'static str;
    }
}

/// State transitions
///
/// Reducers are the only code allowed to mutate store state. They run
/// synchronously, one action at a time, and describe any asynchronous follow-up
/// work as returned effects instead of performing it.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: the slice being mutated
    /// - `Action`: the slice's action enum
    /// - `Environment`: services reachable from effects
    pub trait Reducer {
        /// Slice of state owned by this reducer
        type State;

        /// Actions this reducer understands
        type Action;

        /// Collaborators available while building effects
        type Environment;

        /// Apply `action` to `state` and describe the follow-up work.
        ///
        /// Must not block or perform I/O. Most reducers return zero or
        /// one effect, hence the inline capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are plain values: building one does nothing until the store
/// runs it.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Deferred work returned by a reducer.
    ///
    /// A reducer never performs I/O itself. It returns effects, and the store
    /// runs them after the state update, dispatching whatever action they
    /// yield back into the same store.
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// Dispatch an action after a pause
        Delay {
            /// Pause before dispatch
            duration: Duration,
            /// Dispatched once the pause elapses
            action: Box<Action>,
        },

        /// Async work, usually a service call
        ///
        /// A `Some` output is dispatched back into the store.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Transform the actions this effect produces
        ///
        /// Used to lift a slice reducer's effects into the parent action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: Fn(Action) -> B + Send + Sync + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            }
        }
    }
}

/// Collaborator traits shared by every environment
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Source of the current time
    pub trait Clock: Send + Sync {
        /// Current instant in UTC
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
