//! Effect construction shorthand

/// Wrap an async block into an `Effect::Future`
///
/// The block must evaluate to `Option<Action>`; `Some` is fed back into the
/// store once the future completes.
///
/// # Example
///
/// ```rust,ignore
/// use comixed_core::async_effect;
///
/// let users = env.users.clone();
/// async_effect! {
///     match users.load_current_user().await {
///         Ok(Some(user)) => Some(AuthAction::UserLoaded { user }),
///         _ => Some(AuthAction::NoUserLoaded),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
