//! Application store wiring.

use crate::actions::AppAction;
use crate::config::FrontendConfig;
use crate::environment::AppEnvironment;
use crate::reducers::AppReducer;
use crate::state::AppState;
use comixed_runtime::Store;

/// The single store shared by adaptors and components.
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Create the application store with initial state.
#[must_use]
pub fn build_store(environment: AppEnvironment, config: &FrontendConfig) -> AppStore {
    tracing::info!(
        broadcast_capacity = config.broadcast_capacity,
        "Creating application store"
    );
    Store::with_config(
        AppState::default(),
        AppReducer::new(),
        environment,
        config.store_config(),
    )
}
