//! User session operations.

use super::ServiceFuture;
use crate::models::User;

/// Session and preference operations.
pub trait UserService: Send + Sync {
    /// Preference `name` of the current user, or `default` when unset.
    fn get_user_preference(&self, name: &str, default: &str) -> String;

    /// The logged-in user, `None` when there is no session.
    fn load_current_user(&self) -> ServiceFuture<'_, Option<User>>;

    /// Save a preference and return the updated user.
    fn set_user_preference(&self, name: String, value: String) -> ServiceFuture<'_, User>;

    /// End the session on the back end.
    fn logout(&self) -> ServiceFuture<'_, ()>;
}
