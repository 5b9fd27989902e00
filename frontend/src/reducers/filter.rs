//! Library filter reducer.

use crate::actions::LibraryFilterAction;
use crate::environment::AppEnvironment;
use crate::state::LibraryFilter;
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::SmallVec;

/// Reducer for [`LibraryFilter`]. Every new filter is marked `changed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryFilterReducer;

impl Reducer for LibraryFilterReducer {
    type State = LibraryFilter;
    type Action = LibraryFilterAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        *state = match action {
            LibraryFilterAction::ChangeFilter { filter } => filter,
            LibraryFilterAction::ResetFilter => LibraryFilter::default(),
        };
        state.changed = true;

        SmallVec::new()
    }
}
