//! Multiple comics scraping reducer.

use crate::actions::ScrapingAction;
use crate::environment::AppEnvironment;
use crate::state::MultipleComicsScraping;
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::SmallVec;

/// Reducer for [`MultipleComicsScraping`].
///
/// The queue keeps the order comics were started in; the session is busy
/// while the queue is non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrapingReducer;

impl Reducer for ScrapingReducer {
    type State = MultipleComicsScraping;
    type Action = ScrapingAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ScrapingAction::Setup { api_key } => state.api_key = api_key,
            ScrapingAction::Start { comics } => {
                state.busy = !comics.is_empty();
                state.comics = comics;
                state.started_at = Some(env.clock.now());
            },
            ScrapingAction::ComicScraped { comic } => {
                state.comics.retain(|queued| queued.id != comic.id);
                state.busy = !state.comics.is_empty();
            },
            ScrapingAction::Stop => {
                state.comics.clear();
                state.busy = false;
            },
        }

        SmallVec::new()
    }
}
