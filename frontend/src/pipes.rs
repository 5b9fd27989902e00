//! View formatting helpers.

use crate::models::User;

/// Value of preference `name` for `user`.
///
/// The first preference with a matching name wins. Returns `None` when
/// there is no user or no such preference.
///
/// ```
/// use comixed_frontend::{fixtures, pipes::user_preference};
///
/// let admin = fixtures::user_admin();
/// assert_eq!(user_preference(Some(&admin), "api_key"), Some("1234567890ABCDEF"));
/// assert_eq!(user_preference(None, "api_key"), None);
/// ```
#[must_use]
pub fn user_preference<'a>(user: Option<&'a User>, name: &str) -> Option<&'a str> {
    user?
        .preferences
        .iter()
        .find(|preference| preference.name == name)
        .map(|preference| preference.value.as_str())
}
