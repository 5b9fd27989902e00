//! Given/When/Then harness for reducers
//!
//! A reducer is run synchronously against a fixed environment; state and
//! effect assertions run afterwards. Effects are inspected, never executed.

#![allow(clippy::module_name_repetitions)]

use comixed_core::{effect::Effect, reducer::Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;

type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Builder running one or more actions through a reducer
///
/// Several `when_action` calls are reduced in order; effect assertions see
/// the effects of the last one.
///
/// # Example
///
/// ```ignore
/// use comixed_testing::ReducerTest;
///
/// ReducerTest::new(AuthenticationReducer)
///     .with_env(test_environment())
///     .given_state(AuthenticationState::default())
///     .when_action(AuthAction::SetToken { token: "abc".into() })
///     .then_state(|state| {
///         assert_eq!(state.auth_token.as_deref(), Some("abc"));
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Environment passed to every reduction
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// State before the first action (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Check the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Check the effects returned for the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce every queued action, then run the assertions
    ///
    /// # Panics
    ///
    /// Panics when the state, an action or the environment is missing, and
    /// when an assertion fails.
    #[allow(clippy::panic)]
    #[allow(clippy::expect_used)]
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("given_state() was not called");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("with_env() was not called");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Assertions over returned effects
pub mod assertions {
    use comixed_core::effect::Effect;

    /// Every effect is `Effect::None`
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected only no-op effects, got {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Exactly `expected` effects were returned
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    #[allow(clippy::panic)]
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "expected {} effects, got {}",
            expected,
            effects.len()
        );
    }

    /// At least one effect is an `Effect::Future`
    ///
    /// # Panics
    ///
    /// Panics when no future effect is present.
    #[allow(clippy::panic)]
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|effect| matches!(effect, Effect::Future(_))),
            "expected a future effect"
        );
    }

    /// Await every `Future` effect in order and collect the actions they yield
    ///
    /// `Delay` effects yield their action without sleeping.
    pub async fn resolve_effects<A>(effects: Vec<Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();

        for effect in effects {
            match effect {
                Effect::None => {},
                Effect::Future(future) => actions.extend(future.await),
                Effect::Delay { action, .. } => actions.push(*action),
            }
        }

        actions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use comixed_core::{smallvec, SmallVec};
    use std::time::Duration;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct ShelfState {
        shelved: Vec<u64>,
        loading: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ShelfAction {
        Shelve(u64),
        Unshelve(u64),
        Load,
        Loaded(Vec<u64>),
    }

    struct ShelfReducer;

    struct NoServices;

    impl Reducer for ShelfReducer {
        type State = ShelfState;
        type Action = ShelfAction;
        type Environment = NoServices;

        fn reduce(
            &self,
            state: &mut ShelfState,
            action: ShelfAction,
            _env: &NoServices,
        ) -> SmallVec<[Effect<ShelfAction>; 4]> {
            match action {
                ShelfAction::Shelve(id) => {
                    state.shelved.push(id);
                    smallvec![Effect::None]
                },
                ShelfAction::Unshelve(id) => {
                    state.shelved.retain(|shelved| *shelved != id);
                    smallvec![Effect::None]
                },
                ShelfAction::Load => {
                    state.loading = true;
                    smallvec![
                        Effect::Future(Box::pin(async { Some(ShelfAction::Loaded(vec![1, 3])) })),
                        Effect::Delay {
                            duration: Duration::from_secs(60),
                            action: Box::new(ShelfAction::Loaded(vec![5])),
                        },
                    ]
                },
                ShelfAction::Loaded(ids) => {
                    state.shelved = ids;
                    state.loading = false;
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn test_actions_apply_in_order() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoServices)
            .given_state(ShelfState::default())
            .when_action(ShelfAction::Shelve(1))
            .when_action(ShelfAction::Shelve(3))
            .when_action(ShelfAction::Unshelve(1))
            .then_state(|state| assert_eq!(state.shelved, vec![3]))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_effects_come_from_last_action() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoServices)
            .given_state(ShelfState::default())
            .when_action(ShelfAction::Shelve(7))
            .when_action(ShelfAction::Load)
            .then_state(|state| assert!(state.loading))
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    #[should_panic(expected = "with_env() was not called")]
    fn test_missing_environment_panics() {
        ReducerTest::new(ShelfReducer)
            .given_state(ShelfState::default())
            .when_action(ShelfAction::Load)
            .run();
    }

    #[test]
    fn test_effect_count_assertions() {
        assertions::assert_effects_count::<ShelfAction>(&[], 0);
        assertions::assert_effects_count(&[Effect::<ShelfAction>::None], 1);
        assertions::assert_has_future_effect(&[
            Effect::None,
            Effect::Future(Box::pin(async { Some(ShelfAction::Load) })),
        ]);
    }

    #[tokio::test]
    async fn test_resolve_effects_keeps_order_without_sleeping() {
        let mut state = ShelfState::default();
        let effects = ShelfReducer
            .reduce(&mut state, ShelfAction::Load, &NoServices)
            .into_vec();

        let actions = assertions::resolve_effects(effects).await;

        assert_eq!(
            actions,
            vec![ShelfAction::Loaded(vec![1, 3]), ShelfAction::Loaded(vec![5])]
        );
    }
}
