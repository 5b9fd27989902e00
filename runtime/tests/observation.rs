//! Integration tests for observing a Store
//!
//! Covers the two observation channels: the action broadcast used by
//! request/response callers and the `select` listeners used by components.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use comixed_core::{action::Action, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use comixed_runtime::{Store, StoreConfig, StoreError};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ShelfAction {
    /// Ask the back end for a page of titles
    Load { page: u32 },
    /// A page arrived
    Loaded { page: u32, titles: Vec<String> },
    /// A page never arrives
    LoadForever,
    /// Put one title on the shelf
    Shelve { title: String },
    /// Empty the shelf
    Clear,
}

impl Action for ShelfAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::Load { .. } => "[Shelf] Load",
            Self::Loaded { .. } => "[Shelf] Loaded",
            Self::LoadForever => "[Shelf] Load Forever",
            Self::Shelve { .. } => "[Shelf] Shelve",
            Self::Clear => "[Shelf] Clear",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ShelfState {
    titles: Vec<String>,
    loading: bool,
}

#[derive(Clone)]
struct ShelfEnvironment;

#[derive(Clone)]
struct ShelfReducer;

impl Reducer for ShelfReducer {
    type State = ShelfState;
    type Action = ShelfAction;
    type Environment = ShelfEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ShelfAction::Load { page } => {
                state.loading = true;
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Some(ShelfAction::Loaded {
                        page,
                        titles: vec![format!("Title {page}")],
                    })
                }))]
            },
            ShelfAction::Loaded { titles, .. } => {
                state.loading = false;
                state.titles.extend(titles);
                smallvec![Effect::None]
            },
            ShelfAction::LoadForever => {
                state.loading = true;
                smallvec![Effect::None]
            },
            ShelfAction::Shelve { title } => {
                state.titles.push(title);
                smallvec![Effect::None]
            },
            ShelfAction::Clear => {
                state.titles.clear();
                smallvec![Effect::None]
            },
        }
    }
}

type ShelfStore = Store<ShelfState, ShelfAction, ShelfEnvironment, ShelfReducer>;

fn new_store() -> ShelfStore {
    Store::new(ShelfState::default(), ShelfReducer, ShelfEnvironment)
}

// ============================================================================
// Action broadcast
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_effect_result() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            ShelfAction::Load { page: 3 },
            |action| matches!(action, ShelfAction::Loaded { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        ShelfAction::Loaded {
            page: 3,
            titles: vec!["Title 3".to_string()],
        }
    );
    assert!(!store.state(|s| s.loading).await);
}

#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            ShelfAction::LoadForever,
            |action| matches!(action, ShelfAction::Loaded { .. }),
            Duration::from_millis(30),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn test_send_and_wait_for_matches_dispatched_action() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            ShelfAction::Clear,
            |action| matches!(action, ShelfAction::Clear),
            Duration::from_millis(100),
        )
        .await;

    assert_eq!(result.unwrap(), ShelfAction::Clear);
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_results() {
    let store = Arc::new(new_store());
    let mut tasks = vec![];

    for page in 1..=5 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    ShelfAction::Load { page },
                    move |action| {
                        matches!(action, ShelfAction::Loaded { page: loaded, .. } if *loaded == page)
                    },
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for task in tasks {
        let result = task.await.expect("task panicked");
        assert!(matches!(result, Ok(ShelfAction::Loaded { .. })));
    }

    assert_eq!(store.state(|s| s.titles.len()).await, 5);
}

#[tokio::test]
async fn test_lagging_observer_keeps_store_running() {
    let store = Store::with_config(
        ShelfState::default(),
        ShelfReducer,
        ShelfEnvironment,
        StoreConfig::default().with_broadcast_capacity(4),
    );
    let mut rx = store.subscribe_actions();

    for n in 0..20 {
        store
            .send(ShelfAction::Shelve {
                title: format!("#{n}"),
            })
            .await
            .unwrap();
    }

    let mut received = 0;
    let mut lagged = false;
    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => lagged = true,
            Err(_) => break,
        }
    }

    assert!(lagged, "expected the observer to lag");
    assert_eq!(received, 4);
    assert_eq!(store.state(|s| s.titles.len()).await, 20);
}

// ============================================================================
// Selectors
// ============================================================================

#[tokio::test]
async fn test_listeners_run_in_registration_order() {
    let store = new_store();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first_log = Arc::clone(&log);
    let _first = store
        .select(|s| s.titles.len(), move |n| first_log.lock().push(("first", n)))
        .await;
    let second_log = Arc::clone(&log);
    let _second = store
        .select(|s| s.titles.len(), move |n| second_log.lock().push(("second", n)))
        .await;

    store
        .send(ShelfAction::Shelve {
            title: "Saga #1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        *log.lock(),
        vec![("first", 0), ("second", 0), ("first", 1), ("second", 1)]
    );
}

#[tokio::test]
async fn test_effect_results_reach_listeners() {
    let store = new_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = store
        .select(|s| s.loading, move |loading| sink.lock().push(loading))
        .await;

    let mut handle = store.send(ShelfAction::Load { page: 1 }).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(*seen.lock(), vec![false, true, false]);
}

#[tokio::test]
async fn test_dropping_subscriptions_releases_listeners() {
    let store = new_store();

    let subscriptions = vec![
        store.select(|s| s.loading, |_| {}).await,
        store.select(|s| s.titles.clone(), |_| {}).await,
    ];
    assert_eq!(store.subscriber_count(), 2);

    drop(subscriptions);
    assert_eq!(store.subscriber_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unsubscribe_waits_for_listener_in_flight() {
    let store = new_store();
    let entered = Arc::new(AtomicBool::new(false));
    let released = Arc::new(AtomicBool::new(false));
    let late_writes = Arc::new(AtomicUsize::new(0));
    let view = Arc::new(Mutex::new(0usize));

    let subscription = {
        let entered = Arc::clone(&entered);
        let released = Arc::clone(&released);
        let late_writes = Arc::clone(&late_writes);
        let view = Arc::clone(&view);
        store
            .select(
                |s| s.titles.len(),
                move |count| {
                    if count == 0 {
                        *view.lock() = count;
                        return;
                    }
                    entered.store(true, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(200));
                    if released.load(Ordering::SeqCst) {
                        late_writes.fetch_add(1, Ordering::SeqCst);
                    }
                    *view.lock() = count;
                },
            )
            .await
    };

    let sender = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .send(ShelfAction::Shelve {
                    title: "Watchmen #1".to_string(),
                })
                .await
        })
    };

    while !entered.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    subscription.unsubscribe();
    released.store(true, Ordering::SeqCst);

    sender.await.unwrap().unwrap();
    assert_eq!(late_writes.load(Ordering::SeqCst), 0);
    assert_eq!(*view.lock(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

proptest! {
    /// A listener sees exactly the distinct successive projections, in order.
    #[test]
    fn prop_listener_sees_distinct_projections_in_order(
        ops in prop::collection::vec(prop::option::of("[a-c]"), 0..30)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let store = new_store();
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&seen);
            let _subscription = store
                .select(|s| s.titles.len(), move |n| sink.lock().push(n))
                .await;

            let mut expected = vec![0usize];
            let mut len = 0usize;
            for op in ops {
                let action = match op {
                    Some(title) => {
                        len += 1;
                        ShelfAction::Shelve { title }
                    },
                    None => {
                        len = 0;
                        ShelfAction::Clear
                    },
                };
                if expected.last() != Some(&len) {
                    expected.push(len);
                }
                store.send(action).await.unwrap();
            }

            prop_assert_eq!(seen.lock().clone(), expected);
            Ok(())
        })?;
    }
}
