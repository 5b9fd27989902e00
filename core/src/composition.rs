//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Run a slice reducer inside a larger state and action type
//!
//! The application reducer is built by scoping one reducer per slice
//! (authentication, library, selection, ...) into the root state and then
//! combining the scoped reducers.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Boxed reducer that can be shared with the store's worker tasks.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Merge reducers over one state and action type.
///
/// Every reducer sees every action, in registration order. The returned effects
/// are the concatenation of each reducer's effects in that same order.
///
/// # Examples
///
/// ```
/// use comixed_core::{Effect, Reducer, SmallVec};
/// use comixed_core::composition::combine_reducers;
///
/// #[derive(Clone, Default)]
/// struct PanelState {
///     opened: u32,
///     closed: u32,
/// }
///
/// #[derive(Clone)]
/// enum PanelAction {
///     Open,
///     Close,
/// }
///
/// struct OpenCounter;
/// struct CloseCounter;
///
/// impl Reducer for OpenCounter {
///     type State = PanelState;
///     type Action = PanelAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut PanelState, action: PanelAction, _env: &()) -> SmallVec<[Effect<PanelAction>; 4]> {
///         if matches!(action, PanelAction::Open) {
///             state.opened += 1;
///         }
///         SmallVec::new()
///     }
/// }
///
/// impl Reducer for CloseCounter {
///     type State = PanelState;
///     type Action = PanelAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut PanelState, action: PanelAction, _env: &()) -> SmallVec<[Effect<PanelAction>; 4]> {
///         if matches!(action, PanelAction::Close) {
///             state.closed += 1;
///         }
///         SmallVec::new()
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(OpenCounter), Box::new(CloseCounter)]);
///
/// let mut state = PanelState::default();
/// let _ = combined.reduce(&mut state, PanelAction::Open, &());
/// assert_eq!(state.opened, 1);
/// assert_eq!(state.closed, 0);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// Reducers merged by [`combine_reducers`].
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in this combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducers
            .iter()
            .flat_map(|reducer| reducer.reduce(state, action.clone(), env))
            .collect()
    }
}

/// Scopes a slice reducer into a parent state and parent action type.
///
/// - `get_state` focuses the parent state on the slice
/// - `extract_action` picks the slice action out of a parent action, or returns
///   `None` when the slice does not care about it
/// - `embed_action` lifts the slice actions produced by effects back into the
///   parent action type
///
/// # Examples
///
/// ```
/// use comixed_core::{Effect, Reducer, SmallVec};
/// use comixed_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct LoginState {
///     visible: bool,
/// }
///
/// #[derive(Clone, Debug)]
/// enum LoginAction {
///     Show,
/// }
///
/// struct LoginReducer;
///
/// impl Reducer for LoginReducer {
///     type State = LoginState;
///     type Action = LoginAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut LoginState, action: LoginAction, _env: &()) -> SmallVec<[Effect<LoginAction>; 4]> {
///         match action {
///             LoginAction::Show => state.visible = true,
///         }
///         SmallVec::new()
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct RootState {
///     login: LoginState,
///     title: String,
/// }
///
/// #[derive(Clone, Debug)]
/// enum RootAction {
///     Login(LoginAction),
///     Rename(String),
/// }
///
/// let scoped = scope_reducer(
///     LoginReducer,
///     |root: &mut RootState| &mut root.login,
///     |action: RootAction| match action {
///         RootAction::Login(action) => Some(action),
///         RootAction::Rename(_) => None,
///     },
///     RootAction::Login,
/// );
///
/// let mut state = RootState::default();
/// let _ = scoped.reduce(&mut state, RootAction::Login(LoginAction::Show), &());
/// assert!(state.login.visible);
/// ```
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    get_state: fn(&mut S) -> &mut SubS,
    extract_action: fn(A) -> Option<SubA>,
    embed_action: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        extract_action,
        embed_action,
        _phantom: std::marker::PhantomData,
    }
}

/// A reducer scoped to a slice of a larger state and action type.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    get_state: fn(&mut S) -> &mut SubS,
    extract_action: fn(A) -> Option<SubA>,
    embed_action: fn(SubA) -> A,
    _phantom: std::marker::PhantomData<fn() -> E>,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    A: Send + 'static,
    SubA: Send + 'static,
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(sub_action) = (self.extract_action)(action) else {
            return SmallVec::new();
        };

        let sub_state = (self.get_state)(state);
        let embed = self.embed_action;

        self.reducer
            .reduce(sub_state, sub_action, env)
            .into_iter()
            .map(|effect| effect.map(embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Shelf {
        issues: Vec<u32>,
        label: String,
    }

    #[derive(Clone)]
    enum ShelfAction {
        Stack(u32),
        Pop,
        Label(String),
    }

    struct StackReducer;

    impl Reducer for StackReducer {
        type State = Shelf;
        type Action = ShelfAction;
        type Environment = ();

        fn reduce(&self, state: &mut Shelf, action: ShelfAction, _env: &()) -> SmallVec<[Effect<ShelfAction>; 4]> {
            match action {
                ShelfAction::Stack(issue) => state.issues.push(issue),
                ShelfAction::Pop => {
                    state.issues.pop();
                },
                ShelfAction::Label(_) => return SmallVec::new(),
            }
            smallvec![Effect::None]
        }
    }

    struct LabelReducer;

    impl Reducer for LabelReducer {
        type State = Shelf;
        type Action = ShelfAction;
        type Environment = ();

        fn reduce(&self, state: &mut Shelf, action: ShelfAction, _env: &()) -> SmallVec<[Effect<ShelfAction>; 4]> {
            if let ShelfAction::Label(label) = action {
                state.label = label;
                return smallvec![Effect::None];
            }
            SmallVec::new()
        }
    }

    #[test]
    fn test_combined_reducers_all_see_each_action() {
        let combined = combine_reducers(vec![Box::new(StackReducer), Box::new(LabelReducer)]);
        assert_eq!(combined.len(), 2);
        assert!(!combined.is_empty());

        let mut shelf = Shelf::default();
        let effects = combined.reduce(&mut shelf, ShelfAction::Stack(12), &());
        assert_eq!(effects.len(), 1);

        let effects = combined.reduce(&mut shelf, ShelfAction::Label("Golden Age".to_string()), &());
        assert_eq!(effects.len(), 1);

        let _ = combined.reduce(&mut shelf, ShelfAction::Stack(13), &());
        let _ = combined.reduce(&mut shelf, ShelfAction::Pop, &());

        assert_eq!(shelf.issues, vec![12]);
        assert_eq!(shelf.label, "Golden Age");
    }

    #[test]
    fn test_empty_combination_is_inert() {
        let combined: CombinedReducer<Shelf, ShelfAction, ()> = combine_reducers(Vec::new());
        assert!(combined.is_empty());

        let mut shelf = Shelf::default();
        assert!(combined.reduce(&mut shelf, ShelfAction::Stack(1), &()).is_empty());
        assert!(shelf.issues.is_empty());
    }

    #[derive(Clone, Default)]
    struct Scanner {
        scanned: u32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ScanAction {
        Scan(u32),
        Scanned(u32),
    }

    struct ScanReducer;

    impl Reducer for ScanReducer {
        type State = Scanner;
        type Action = ScanAction;
        type Environment = ();

        fn reduce(&self, state: &mut Scanner, action: ScanAction, _env: &()) -> SmallVec<[Effect<ScanAction>; 4]> {
            match action {
                ScanAction::Scan(files) => {
                    state.scanned += files;
                    smallvec![Effect::Delay {
                        duration: Duration::ZERO,
                        action: Box::new(ScanAction::Scanned(files)),
                    }]
                },
                ScanAction::Scanned(_) => SmallVec::new(),
            }
        }
    }

    #[derive(Clone, Default)]
    struct Library {
        scanner: Scanner,
        name: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum LibraryAction {
        Scanner(ScanAction),
        Rename(String),
    }

    fn scanner_slice(library: &mut Library) -> &mut Scanner {
        &mut library.scanner
    }

    fn scanner_action(action: LibraryAction) -> Option<ScanAction> {
        match action {
            LibraryAction::Scanner(action) => Some(action),
            LibraryAction::Rename(_) => None,
        }
    }

    fn scoped() -> ScopedReducer<Library, Scanner, LibraryAction, ScanAction, (), ScanReducer> {
        scope_reducer(ScanReducer, scanner_slice, scanner_action, LibraryAction::Scanner)
    }

    #[test]
    fn test_scoped_reducer_only_touches_its_slice() {
        let reducer = scoped();
        let mut library = Library {
            scanner: Scanner { scanned: 40 },
            name: "Longboxes".to_string(),
        };

        let _ = reducer.reduce(&mut library, LibraryAction::Scanner(ScanAction::Scan(2)), &());

        assert_eq!(library.scanner.scanned, 42);
        assert_eq!(library.name, "Longboxes");
    }

    #[test]
    fn test_scoped_reducer_skips_other_actions() {
        let reducer = scoped();
        let mut library = Library::default();

        let effects = reducer.reduce(&mut library, LibraryAction::Rename("Attic".to_string()), &());

        assert!(effects.is_empty());
        assert_eq!(library.scanner.scanned, 0);
    }

    #[test]
    fn test_scoped_reducer_lifts_effect_actions() {
        let reducer = scoped();
        let mut library = Library::default();

        let effects = reducer.reduce(&mut library, LibraryAction::Scanner(ScanAction::Scan(5)), &());

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Delay { action, .. } if **action == LibraryAction::Scanner(ScanAction::Scanned(5))
        ));
    }
}
