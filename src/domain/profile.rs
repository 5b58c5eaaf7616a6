//! User profiles, member contacts, and push tokens.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Name used when nothing better is known about a user.
pub const FALLBACK_DISPLAY_NAME: &str = "Someone";

/// Opaque device address understood by the push gateway.
///
/// Never empty: blank tokens are treated as "no device registered".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Wraps a raw token, returning `None` if it is blank.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Normalises an optional column value.
    #[must_use]
    pub fn from_column(raw: Option<String>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    /// Returns the token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// User identifier.
    pub id: UserId,
    /// Sign-in email, if recorded.
    pub email: Option<String>,
    /// Chosen display name, if any.
    pub display_name: Option<String>,
    /// Registered device token, if any.
    pub push_token: Option<PushToken>,
}

impl Profile {
    /// Resolves the name shown to other users.
    ///
    /// Display name first, then the local part of the email, then
    /// [`FALLBACK_DISPLAY_NAME`].
    #[must_use]
    pub fn display_label(&self) -> String {
        resolve_display_name(self.display_name.as_deref(), self.email.as_deref())
    }
}

/// Picks a non-empty presentation name from optional profile fields.
#[must_use]
pub fn resolve_display_name(display_name: Option<&str>, email: Option<&str>) -> String {
    let named = display_name.map(str::trim).filter(|n| !n.is_empty());
    let local_part = email
        .and_then(|e| e.split('@').next())
        .map(str::trim)
        .filter(|p| !p.is_empty());

    named
        .or(local_part)
        .unwrap_or(FALLBACK_DISPLAY_NAME)
        .to_string()
}

/// A member of an event joined with the parts of their profile needed
/// for notifications.
///
/// The profile may be missing entirely, in which case both optional
/// fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberContact {
    /// Member's user identifier.
    pub user_id: UserId,
    /// Display name from the member's profile.
    pub display_name: Option<String>,
    /// Device token from the member's profile.
    pub push_token: Option<PushToken>,
}

/// Maps each member that has a device token to that token.
#[must_use]
pub fn push_tokens(members: &[MemberContact]) -> HashMap<UserId, PushToken> {
    members
        .iter()
        .filter_map(|m| m.push_token.clone().map(|t| (m.user_id, t)))
        .collect()
}
