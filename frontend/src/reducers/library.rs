//! Library reducer.

use crate::actions::LibraryAction;
use crate::effects;
use crate::environment::AppEnvironment;
use crate::models::{Comic, LibraryUpdate};
use crate::state::{LibraryState, UpdatePolling};
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::{smallvec, SmallVec};

/// Reducer for [`LibraryState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryReducer;

impl LibraryReducer {
    /// Replace comics already held (matched by id) and append new ones.
    fn merge(comics: &mut Vec<Comic>, update: LibraryUpdate) {
        for comic in update.comics {
            match comics.iter_mut().find(|held| held.id == comic.id) {
                Some(held) => *held = comic,
                None => comics.push(comic),
            }
        }
    }

    /// Next poll, when a poll loop is running.
    fn schedule_poll(state: &LibraryState) -> SmallVec<[Effect<LibraryAction>; 4]> {
        match state.polling {
            Some(UpdatePolling { interval, .. }) => smallvec![Effect::Delay {
                duration: interval,
                action: Box::new(LibraryAction::PollDue),
            }],
            None => SmallVec::new(),
        }
    }
}

impl Reducer for LibraryReducer {
    type State = LibraryState;
    type Action = LibraryAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LibraryAction::GetUpdates { since, timeout } => {
                state.fetching_updates = true;
                smallvec![effects::get_library_updates(env, since, timeout)]
            },
            LibraryAction::UpdatesReceived { update } => {
                if let Some(latest) = update.latest_comic_date() {
                    state.last_comic_date = state.last_comic_date.max(latest);
                }
                state.library_contents.rescan_count = update.rescan_count;
                state.library_contents.import_count = update.import_count;
                Self::merge(&mut state.comics, update);
                state.fetching_updates = false;
                Self::schedule_poll(state)
            },
            LibraryAction::GetUpdatesFailed => {
                state.fetching_updates = false;
                Self::schedule_poll(state)
            },
            LibraryAction::StartPolling { interval, timeout } => {
                let already_running = state.polling.is_some();
                state.polling = Some(UpdatePolling { interval, timeout });
                if already_running || state.fetching_updates {
                    return SmallVec::new();
                }
                state.fetching_updates = true;
                smallvec![effects::get_library_updates(env, state.last_comic_date, timeout)]
            },
            LibraryAction::PollDue => match state.polling {
                Some(UpdatePolling { timeout, .. }) if !state.fetching_updates => {
                    state.fetching_updates = true;
                    smallvec![effects::get_library_updates(env, state.last_comic_date, timeout)]
                },
                _ => SmallVec::new(),
            },
            LibraryAction::StopPolling => {
                state.polling = None;
                SmallVec::new()
            },
            LibraryAction::RemoveComic { comic } => {
                state.removing_comic = true;
                smallvec![effects::remove_comic(env, comic)]
            },
            LibraryAction::ComicRemoved { comic } => {
                state.comics.retain(|held| held.id != comic.id);
                state.removing_comic = false;
                SmallVec::new()
            },
            LibraryAction::RemoveComicFailed => {
                state.removing_comic = false;
                SmallVec::new()
            },
            LibraryAction::RescanFiles {
                last_comic_date,
                timeout,
            } => {
                state.rescanning = true;
                smallvec![effects::rescan_library(env, last_comic_date, timeout)]
            },
            LibraryAction::RescanStarted { rescan_count } => {
                state.library_contents.rescan_count = rescan_count;
                state.rescanning = false;
                SmallVec::new()
            },
            LibraryAction::RescanFailed => {
                state.rescanning = false;
                SmallVec::new()
            },
        }
    }
}
