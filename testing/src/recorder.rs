//! Capture the actions a store reduces
//!
//! [`ActionRecorder`] subscribes to a store's action broadcast and lets a
//! test read back what was dispatched, including actions produced by effects.

use comixed_core::{action::Action, reducer::Reducer};
use comixed_runtime::Store;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// How long [`ActionRecorder::next`] waits before giving up
const DEFAULT_WAIT: Duration = Duration::from_secs(2);

/// Records every action reduced by a store after it was attached
///
/// # Example
///
/// ```ignore
/// let mut recorder = ActionRecorder::attach(&store);
/// store.send(AppAction::LibraryFilter(LibraryFilterAction::ResetFilter)).await?;
///
/// assert_eq!(recorder.drain_types(), vec!["[Library Filter] Reset Filter"]);
/// ```
#[derive(Debug)]
pub struct ActionRecorder<A> {
    receiver: broadcast::Receiver<A>,
}

impl<A> ActionRecorder<A>
where
    A: Action,
{
    /// Start recording actions reduced by `store`
    #[must_use]
    pub fn attach<S, E, R>(store: &Store<S, A, E, R>) -> Self
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        Self {
            receiver: store.subscribe_actions(),
        }
    }

    /// Every action recorded so far, oldest first
    ///
    /// Actions dropped because the recorder lagged are skipped.
    pub fn drain(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(action) => actions.push(action),
                Err(TryRecvError::Lagged(_)) => {},
                Err(TryRecvError::Empty | TryRecvError::Closed) => return actions,
            }
        }
    }

    /// Type labels of every action recorded so far
    pub fn drain_types(&mut self) -> Vec<&'static str> {
        self.drain().iter().map(Action::action_type).collect()
    }

    /// Wait for the next recorded action
    ///
    /// Returns `None` if nothing arrives within two seconds.
    pub async fn next(&mut self) -> Option<A> {
        self.next_within(DEFAULT_WAIT).await
    }

    /// Wait up to `timeout` for the next recorded action
    pub async fn next_within(&mut self, timeout: Duration) -> Option<A> {
        tokio::time::timeout(timeout, async {
            loop {
                match self.receiver.recv().await {
                    Ok(action) => return Some(action),
                    Err(broadcast::error::RecvError::Lagged(_)) => {},
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .await
        .ok()
        .flatten()
    }

    /// Wait for the next action whose label is `action_type`
    ///
    /// Returns `None` on timeout; skipped actions are discarded.
    pub async fn wait_for_type(&mut self, action_type: &str) -> Option<A> {
        tokio::time::timeout(DEFAULT_WAIT, async {
            while let Some(action) = self.next_within(DEFAULT_WAIT).await {
                if action.action_type() == action_type {
                    return Some(action);
                }
            }
            None
        })
        .await
        .ok()
        .flatten()
    }
}
