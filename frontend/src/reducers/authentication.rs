//! Authentication reducer.
//!
//! Every transition is an unconditional overwrite of the fields it names.
//! Any action is accepted in any state.

use crate::actions::AuthAction;
use crate::effects;
use crate::environment::AppEnvironment;
use crate::state::AuthenticationState;
use comixed_core::effect::Effect;
use comixed_core::reducer::Reducer;
use comixed_core::{smallvec, SmallVec};

/// Reducer for [`AuthenticationState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticationReducer;

impl Reducer for AuthenticationReducer {
    type State = AuthenticationState;
    type Action = AuthAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::CheckState => {
                state.authenticating = true;
                return smallvec![effects::load_current_user(env)];
            },
            AuthAction::UserLoaded { user } => {
                state.initialized = true;
                state.authenticating = false;
                state.show_login = false;
                state.user = Some(user);
                state.authenticated = true;
            },
            AuthAction::NoUserLoaded => {
                state.initialized = true;
                state.authenticating = false;
                state.authenticated = false;
                state.user = None;
            },
            AuthAction::SetToken { token } => {
                state.auth_token = Some(token);
                state.authenticated = true;
            },
            AuthAction::ClearToken => {
                state.auth_token = None;
                state.authenticated = false;
            },
            AuthAction::ShowLogin => state.show_login = true,
            AuthAction::HideLogin => state.show_login = false,
            AuthAction::Logout => {
                state.authenticated = false;
                state.auth_token = None;
                state.user = None;
                return smallvec![effects::logout(env)];
            },
            AuthAction::SetPreference { name, value } => {
                state.setting_preference = true;
                return smallvec![effects::set_user_preference(env, name, value)];
            },
            AuthAction::PreferenceSet { user } => {
                state.setting_preference = false;
                state.user = Some(user);
            },
            // The user is left as it was
            AuthAction::SetPreferenceFailed => state.setting_preference = false,
        }

        SmallVec::new()
    }
}
