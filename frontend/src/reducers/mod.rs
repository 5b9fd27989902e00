//! Slice reducers and the root [`AppReducer`].
//!
//! Each slice reducer only sees its own state and actions. The root reducer
//! scopes them into [`AppState`] / [`AppAction`] and runs them in slice order.

pub mod authentication;
pub mod filter;
pub mod library;
pub mod scraping;
pub mod selection;

pub use authentication::AuthenticationReducer;
pub use filter::LibraryFilterReducer;
pub use library::LibraryReducer;
pub use scraping::ScrapingReducer;
pub use selection::SelectionReducer;

use crate::actions::{
    AppAction, AuthAction, LibraryAction, LibraryFilterAction, ScrapingAction, SelectionAction,
};
use crate::environment::AppEnvironment;
use crate::state::{
    AppState, AuthenticationState, LibraryFilter, LibraryState, MultipleComicsScraping,
    SelectionState,
};
use comixed_core::composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer};
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::SmallVec;
use std::sync::Arc;

/// Root reducer for the application store.
///
/// Cloning shares the composed slice reducers.
#[derive(Clone)]
pub struct AppReducer {
    inner: Arc<CombinedReducer<AppState, AppAction, AppEnvironment>>,
}

impl AppReducer {
    /// Compose every slice reducer.
    #[must_use]
    pub fn new() -> Self {
        let slices: Vec<BoxedReducer<AppState, AppAction, AppEnvironment>> = vec![
            Box::new(scope_reducer(
                AuthenticationReducer,
                authentication_state,
                authentication_action,
                AppAction::Authentication,
            )),
            Box::new(scope_reducer(
                LibraryReducer,
                library_state,
                library_action,
                AppAction::Library,
            )),
            Box::new(scope_reducer(
                LibraryFilterReducer,
                filter_state,
                filter_action,
                AppAction::LibraryFilter,
            )),
            Box::new(scope_reducer(
                SelectionReducer,
                selection_state,
                selection_action,
                AppAction::Selection,
            )),
            Box::new(scope_reducer(
                ScrapingReducer,
                scraping_state,
                scraping_action,
                AppAction::Scraping,
            )),
        ];

        Self {
            inner: Arc::new(combine_reducers(slices)),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer")
            .field("slices", &self.inner.len())
            .finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

fn authentication_state(state: &mut AppState) -> &mut AuthenticationState {
    &mut state.authentication
}

fn library_state(state: &mut AppState) -> &mut LibraryState {
    &mut state.library
}

fn filter_state(state: &mut AppState) -> &mut LibraryFilter {
    &mut state.library_filter
}

fn selection_state(state: &mut AppState) -> &mut SelectionState {
    &mut state.selection
}

fn scraping_state(state: &mut AppState) -> &mut MultipleComicsScraping {
    &mut state.scraping
}

fn authentication_action(action: AppAction) -> Option<AuthAction> {
    match action {
        AppAction::Authentication(action) => Some(action),
        _ => None,
    }
}

fn library_action(action: AppAction) -> Option<LibraryAction> {
    match action {
        AppAction::Library(action) => Some(action),
        _ => None,
    }
}

fn filter_action(action: AppAction) -> Option<LibraryFilterAction> {
    match action {
        AppAction::LibraryFilter(action) => Some(action),
        _ => None,
    }
}

/// A removed comic can no longer be selected.
fn selection_action(action: AppAction) -> Option<SelectionAction> {
    match action {
        AppAction::Selection(action) => Some(action),
        AppAction::Library(LibraryAction::ComicRemoved { comic }) => {
            Some(SelectionAction::DeselectComics { comics: vec![comic] })
        },
        _ => None,
    }
}

fn scraping_action(action: AppAction) -> Option<ScrapingAction> {
    match action {
        AppAction::Scraping(action) => Some(action),
        _ => None,
    }
}

/// Environment backed by empty in-memory collaborators.
#[cfg(test)]
pub(crate) fn test_environment() -> AppEnvironment {
    use crate::mocks::{InMemoryComicService, InMemoryUserService, RecordingNotifier};

    AppEnvironment::new(
        Arc::new(InMemoryComicService::new()),
        Arc::new(InMemoryUserService::new()),
        Arc::new(RecordingNotifier::new()),
        Arc::new(comixed_testing::test_clock()),
    )
}
