//! # ComixEd Runtime
//!
//! Store runtime for the ComixEd front end.
//!
//! The [`Store`] owns the application state, runs the root reducer for every
//! dispatched action, executes the returned effects and feeds their actions
//! back in. Components observe state through [`Store::select`], which hands
//! back an owning [`Subscription`].
//!
//! ## Example
//!
//! ```ignore
//! use comixed_runtime::Store;
//!
//! let store = Store::new(AppState::default(), AppReducer::new(), environment);
//!
//! let subscription = store
//!     .select(|s| s.library.comics.len(), |count| tracing::info!(count, "Library changed"))
//!     .await;
//!
//! store.send(AppAction::Library(LibraryAction::GetUpdates { .. })).await?;
//! ```

use comixed_core::{action::Action, effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store and service metrics
pub mod metrics;

/// State listeners and subscription handles
pub mod subscription;

/// Store failures
pub mod error {
    use thiserror::Error;

    /// Failure of a store operation
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// The store no longer accepts actions
        #[error("store no longer accepts actions")]
        ShutdownInProgress,

        /// Effects were still running when the shutdown deadline passed
        #[error("{0} effects still running at shutdown deadline")]
        ShutdownTimeout(usize),

        /// A wait on effects or on a matching action ran out of time
        #[error("timed out")]
        Timeout,

        /// Every sender of the action stream is gone
        #[error("action stream closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;
pub use subscription::Subscription;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use subscription::Listeners;
use tokio::sync::watch;

/// Runtime settings for a [`Store`]
///
/// ```ignore
/// let store = Store::with_config(
///     AppState::default(),
///     AppReducer::new(),
///     environment,
///     StoreConfig::new(128, Duration::from_secs(5)),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of actions buffered for each action observer
    pub broadcast_capacity: usize,
    /// Deadline used by [`Store::shutdown_gracefully`]
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Settings with explicit values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the graceful shutdown deadline
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 64,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Completion tracker for the effects of one dispatch
///
/// Returned by [`Store::send()`]. Tracks the effects returned by the reducer
/// for that one action; effects of follow-up actions have their own handles.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(AppAction::Authentication(AuthAction::CheckState)).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// A handle with nothing left to wait for
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of tracked effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait until every tracked effect has completed
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// [`wait`](Self::wait), bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Counter shared by an [`EffectHandle`] and the effects it tracks
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Marks one tracked effect finished when dropped, panics included.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Releases one store-wide pending effect when dropped.
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The store itself.
pub mod store {
    use super::{
        Action, Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration,
        Effect, EffectHandle, EffectTracking, Listeners, Ordering, Reducer, RwLock, StoreConfig,
        StoreError, Subscription,
    };
    use crate::subscription::Listener;
    use tokio::sync::broadcast;

    /// Single owner of application state.
    ///
    /// State sits behind an `RwLock` that only the reducer writes. Effects
    /// returned by the reducer run on tokio tasks and dispatch their result
    /// actions back through [`Store::send`]. Views read state through
    /// [`Store::state`] or register a projection with [`Store::select`].
    ///
    /// # Ordering
    ///
    /// Actions are reduced one at a time. After each reduction the write
    /// guard is downgraded and every listener runs against that exact
    /// state before the next action may be reduced.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        listeners: Arc<Listeners<S>>,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        default_shutdown_timeout: Duration,
        /// Every reduced action is broadcast here after listeners ran.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Action,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Store with default [`StoreConfig`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Store with explicit settings
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                listeners: Arc::new(Listeners::new()),
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                default_shutdown_timeout: config.default_shutdown_timeout,
                action_broadcast,
            }
        }

        /// Whether [`shutdown`](Self::shutdown) has been initiated
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Timeout configured for [`shutdown_gracefully`](Self::shutdown_gracefully)
        #[must_use]
        pub const fn default_shutdown_timeout(&self) -> Duration {
            self.default_shutdown_timeout
        }

        /// Shut down using the configured default timeout
        ///
        /// # Errors
        ///
        /// See [`shutdown`](Self::shutdown).
        pub async fn shutdown_gracefully(&self) -> Result<(), StoreError> {
            self.shutdown(self.default_shutdown_timeout).await
        }

        /// Stop accepting actions and wait for running effects to drain
        ///
        /// Actions sent after this call, including those produced by the
        /// draining effects, are rejected.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
        /// still running when `timeout` passes.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Store shutting down");
            ::metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("Store drained");
                    ::metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Store shutdown timed out");
                    ::metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Dispatch an action
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Downgrades the lock and notifies listeners
        /// 4. Broadcasts the action to observers
        /// 5. Starts the returned effects
        ///
        /// Returns once effects are started, not completed. Use the returned
        /// [`EffectHandle`] to wait for them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once shutdown has begun.
        #[tracing::instrument(skip_all, name = "store_send", fields(action_type = action.action_type()))]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Action rejected during shutdown");
                ::metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let action_type = action.action_type();
            tracing::debug!("Reducing action");

            let (handle, tracking) = EffectHandle::new();
            let observed = action.clone();

            let effects = {
                let mut state = self.state.write().await;

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut state, action, &self.environment);
                    crate::metrics::store::record_action(action_type, start.elapsed());
                    effects
                };

                let state = state.downgrade();
                self.listeners.notify(&state);

                // No receivers is the common case
                let _ = self.action_broadcast.send(observed);

                effects
            };

            tracing::trace!(effects = effects.len(), "Starting effects");
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action
        ///
        /// Subscribes to the action broadcast before sending, so the
        /// dispatched action itself is also offered to `predicate`.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before a matching action
        /// - [`StoreError::ChannelClosed`]: the action stream ended
        /// - [`StoreError::ShutdownInProgress`]: shutdown has begun
        ///
        /// # Example
        ///
        /// ```ignore
        /// let outcome = store
        ///     .send_and_wait_for(
        ///         AppAction::Authentication(AuthAction::CheckState),
        ///         |a| matches!(a, AppAction::Authentication(
        ///             AuthAction::UserLoaded { .. } | AuthAction::NoUserLoaded
        ///         )),
        ///         Duration::from_secs(5),
        ///     )
        ///     .await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action reduced by this store
        ///
        /// Actions arrive in dispatch order. A receiver that falls more than
        /// the configured capacity behind gets [`broadcast::error::RecvError::Lagged`].
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Run `f` against the current state
        ///
        /// ```ignore
        /// let comic_count = store.state(|s| s.library.comics.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Observe a projection of the state
        ///
        /// `on_change` is called once with the current projection, then again
        /// after every reduction whose projection differs from the last one
        /// delivered. The listener lives as long as the returned
        /// [`Subscription`].
        ///
        /// Callbacks run while the store holds a read guard: they must not
        /// block on the store, and anything they dispatch is processed after
        /// the current notification pass.
        pub async fn select<T, P, F>(&self, project: P, on_change: F) -> Subscription
        where
            P: Fn(&S) -> T + Send + Sync + 'static,
            T: Clone + PartialEq + Send + 'static,
            F: Fn(T) + Send + Sync + 'static,
        {
            let last: parking_lot::Mutex<Option<T>> = parking_lot::Mutex::new(None);
            let listener: Listener<S> = Arc::new(move |state: &S| {
                let next = project(state);
                {
                    let mut last = last.lock();
                    if last.as_ref() == Some(&next) {
                        return;
                    }
                    *last = Some(next.clone());
                }
                on_change(next);
            });

            let state = self.state.read().await;
            let subscription = self.listeners.register(Arc::clone(&listener));
            listener(&state);
            subscription
        }

        /// Number of live [`select`](Self::select) subscriptions
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.listeners.len()
        }

        fn spawn_tracked<F>(&self, tracking: &EffectTracking, task: F)
        where
            F: std::future::Future<Output = ()> + Send + 'static,
        {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));
            let guard = DecrementGuard(tracking.clone());

            tokio::spawn(async move {
                let _guard = guard;
                let _pending_guard = pending_guard;
                task.await;
            });
        }

        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            if let Err(error) = self.send(action).await {
                tracing::warn!(%error, "Dropped action produced by effect");
            }
        }

        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    tracing::trace!("Skipping empty effect");
                },
                Effect::Future(fut) => {
                    tracing::trace!("Spawning future effect");
                    crate::metrics::store::record_effect("future");

                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        if let Some(action) = fut.await {
                            tracing::trace!(action_type = action.action_type(), "Future effect yielded action");
                            store.feed_back(action).await;
                        } else {
                            tracing::trace!("Future effect yielded nothing");
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "Scheduling delayed action");
                    crate::metrics::store::record_effect("delay");

                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        tokio::time::sleep(duration).await;
                        store.feed_back(*action).await;
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                listeners: Arc::clone(&self.listeners),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                default_shutdown_timeout: self.default_shutdown_timeout,
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;
