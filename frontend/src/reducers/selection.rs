//! Comic selection reducer.

use crate::actions::SelectionAction;
use crate::environment::AppEnvironment;
use crate::state::SelectionState;
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::SmallVec;

/// Reducer for [`SelectionState`]. Comics are matched by id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionReducer;

impl Reducer for SelectionReducer {
    type State = SelectionState;
    type Action = SelectionAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SelectionAction::SelectComics { comics } => {
                for comic in comics {
                    if !state.is_selected(comic.id) {
                        state.selected_comics.push(comic);
                    }
                }
            },
            SelectionAction::DeselectComics { comics } => {
                state
                    .selected_comics
                    .retain(|selected| !comics.iter().any(|comic| comic.id == selected.id));
            },
            SelectionAction::ClearSelections => state.selected_comics.clear(),
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::reducers::test_environment;
    use comixed_testing::ReducerTest;

    #[test]
    fn test_select_skips_duplicates() {
        ReducerTest::new(SelectionReducer)
            .with_env(test_environment())
            .given_state(SelectionState::default())
            .when_action(SelectionAction::SelectComics {
                comics: vec![fixtures::comic(1), fixtures::comic(3)],
            })
            .when_action(SelectionAction::SelectComics {
                comics: vec![fixtures::comic(3), fixtures::comic(5)],
            })
            .then_state(|state| {
                let ids: Vec<u64> = state.selected_comics.iter().map(|comic| comic.id).collect();
                assert_eq!(ids, vec![1, 3, 5]);
            })
            .run();
    }

    #[test]
    fn test_deselect() {
        ReducerTest::new(SelectionReducer)
            .with_env(test_environment())
            .given_state(SelectionState {
                selected_comics: fixtures::comics(),
            })
            .when_action(SelectionAction::DeselectComics {
                comics: vec![fixtures::comic(3)],
            })
            .then_state(|state| {
                assert!(!state.is_selected(3));
                assert!(state.is_selected(1));
                assert!(state.is_selected(5));
            })
            .run();
    }

    #[test]
    fn test_clear() {
        ReducerTest::new(SelectionReducer)
            .with_env(test_environment())
            .given_state(SelectionState {
                selected_comics: fixtures::comics(),
            })
            .when_action(SelectionAction::ClearSelections)
            .then_state(|state| assert!(state.selected_comics.is_empty()))
            .run();
    }
}
