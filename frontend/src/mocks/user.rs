//! In-memory user service.

use crate::error::ServiceError;
use crate::models::{Preference, User};
use crate::pipes::user_preference;
use crate::services::{ServiceFuture, UserService};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    user: Option<User>,
    failure: Option<ServiceError>,
    logouts: usize,
}

/// User service holding the session in memory.
///
/// With [`failing_with`](Self::failing_with) every asynchronous call answers
/// with that error.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserService {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryUserService {
    /// Service with nobody logged in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `user` in.
    #[must_use]
    pub fn with_user(self, user: User) -> Self {
        self.inner.lock().user = Some(user);
        self
    }

    /// Fail every asynchronous call with `error`.
    #[must_use]
    pub fn failing_with(self, error: ServiceError) -> Self {
        self.inner.lock().failure = Some(error);
        self
    }

    /// Currently logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.lock().user.clone()
    }

    /// Number of successful logouts.
    #[must_use]
    pub fn logouts(&self) -> usize {
        self.inner.lock().logouts
    }

    fn check(&self) -> Result<(), ServiceError> {
        self.inner.lock().failure.clone().map_or(Ok(()), Err)
    }
}

impl UserService for InMemoryUserService {
    fn get_user_preference(&self, name: &str, default: &str) -> String {
        let inner = self.inner.lock();
        user_preference(inner.user.as_ref(), name)
            .unwrap_or(default)
            .to_string()
    }

    fn load_current_user(&self) -> ServiceFuture<'_, Option<User>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.current_user())
        })
    }

    fn set_user_preference(&self, name: String, value: String) -> ServiceFuture<'_, User> {
        Box::pin(async move {
            self.check()?;
            let mut inner = self.inner.lock();
            let user = inner.user.as_mut().ok_or(ServiceError::Unauthorized)?;
            match user.preferences.iter_mut().find(|preference| preference.name == name) {
                Some(preference) => preference.value = value,
                None => user.preferences.push(Preference::new(name, value)),
            }
            Ok(user.clone())
        })
    }

    fn logout(&self) -> ServiceFuture<'_, ()> {
        Box::pin(async move {
            self.check()?;
            let mut inner = self.inner.lock();
            inner.user = None;
            inner.logouts += 1;
            Ok(())
        })
    }
}
