//! # User model
//!
//! [`User`] is the subset of the backend's user object that the app reads. The
//! auth endpoints return it nested inside a token response, or bare when a
//! sign-up still needs email confirmation.
//!
//! `identities` matters for sign-up only: the backend answers a sign-up for an
//! already registered (but unconfirmed) address with a user whose identity list
//! is empty instead of an error.

use serde::{Deserialize, Serialize};

/// An authenticated (or pending) user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub identities: Option<Vec<Identity>>,
}

/// A linked sign-in method (email, google, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(default)]
    pub provider: String,
}

impl User {
    /// Get display name, falling back to the id when the email is not set.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }

    /// True when the backend reports no identity for this user, which is how an
    /// existing unconfirmed address shows up after a sign-up.
    pub fn has_no_identities(&self) -> bool {
        matches!(&self.identities, Some(list) if list.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_distinguish_existing_users() {
        let fresh: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.c","identities":[{"provider":"email"}]}"#,
        )
        .unwrap();
        assert!(!fresh.has_no_identities());

        let existing: User =
            serde_json::from_str(r#"{"id":"u2","email":"a@b.c","identities":[]}"#).unwrap();
        assert!(existing.has_no_identities());

        // Missing list is not the same as an empty one
        let bare: User = serde_json::from_str(r#"{"id":"u3"}"#).unwrap();
        assert!(!bare.has_no_identities());
        assert_eq!(bare.display_name(), "u3");
    }
}
