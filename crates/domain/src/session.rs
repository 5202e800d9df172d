//! Authenticated session model.
//!
//! A [`Session`] is the client-held record of a logged-in user: a bearer
//! token, its absolute expiry in epoch milliseconds, and an optional display
//! name. Sessions are persisted as three string slots (see [`SessionSlot`])
//! and decoded back through [`SessionSlots::decode`].
//!
//! Expiry is never tracked with a timer. Callers run [`validate`] before each
//! authenticated use and drop the session when it returns `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps below this value are interpreted as epoch seconds.
pub const SECONDS_THRESHOLD: f64 = 1e12;

/// Lifetime assigned to a session whose login response carried no usable expiry.
pub const DEFAULT_SESSION_LIFETIME_MS: i64 = 7 * 24 * 3600 * 1000;

/// Normalizes a raw expiry timestamp to epoch milliseconds.
///
/// Values below [`SECONDS_THRESHOLD`] are treated as seconds and multiplied
/// by 1000; larger values are already milliseconds. Returns `None` for NaN
/// and infinities.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_expiry_ms(raw: f64) -> Option<i64> {
    if !raw.is_finite() {
        return None;
    }
    let ms = if raw < SECONDS_THRESHOLD {
        raw * 1000.0
    } else {
        raw
    };
    Some(ms as i64)
}

/// The client-held record of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential.
    pub token: String,
    /// Absolute expiry in epoch milliseconds.
    pub expires_at_ms: i64,
    /// Display name, never used for authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    /// Creates a session with an already-normalized expiry.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_at_ms: i64) -> Self {
        Self {
            token: token.into(),
            expires_at_ms,
            username: None,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Returns true if the session is expired at `now`.
    ///
    /// A session is still valid at exactly its expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expires_at_ms
    }

    /// Milliseconds left before expiry, or a negative value once expired.
    #[must_use]
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at_ms.saturating_sub(now.timestamp_millis())
    }

    /// Returns the expiry as a UTC timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expires_at_ms)
    }
}

/// Applies the expiry rule to a session.
///
/// Returns the session unchanged while `now <= expires_at_ms`, and `None`
/// once it has expired. The caller owns the follow-up of clearing storage.
#[must_use]
pub fn validate(session: Session, now: DateTime<Utc>) -> Option<Session> {
    if session.is_expired_at(now) {
        None
    } else {
        Some(session)
    }
}

/// Named persistence slots of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionSlot {
    /// The bearer token.
    Token,
    /// The absolute expiry, stored as milliseconds.
    ExpiresAt,
    /// The display name.
    Username,
}

impl SessionSlot {
    /// Returns all slots.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Token, Self::ExpiresAt, Self::Username]
    }

    /// Returns the storage key of this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Token => "dailybook_token",
            Self::ExpiresAt => "dailybook_token_expiresAt",
            Self::Username => "dailybook_username",
        }
    }
}

/// Raw slot values as read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSlots {
    /// Value of [`SessionSlot::Token`].
    pub token: Option<String>,
    /// Value of [`SessionSlot::ExpiresAt`].
    pub expires_at: Option<String>,
    /// Value of [`SessionSlot::Username`].
    pub username: Option<String>,
}

/// Outcome of decoding persisted slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRead {
    /// Token or expiry is missing.
    Absent,
    /// Both slots are present but the expiry is not a finite number.
    Corrupt,
    /// A well-formed session. It may still be expired.
    Present(Session),
}

impl SessionSlots {
    /// Decodes the slots into a session.
    ///
    /// Empty strings count as missing. The expiry is normalized again so
    /// values persisted in seconds compare correctly.
    #[must_use]
    pub fn decode(self) -> SessionRead {
        let (Some(token), Some(expires_at)) = (
            self.token.filter(|t| !t.is_empty()),
            self.expires_at.filter(|e| !e.is_empty()),
        ) else {
            return SessionRead::Absent;
        };

        let Some(expires_at_ms) = expires_at
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(normalize_expiry_ms)
        else {
            return SessionRead::Corrupt;
        };

        SessionRead::Present(Session {
            token,
            expires_at_ms,
            username: self.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at_ms(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }

    #[test]
    fn seconds_are_converted_to_millis() {
        assert_eq!(normalize_expiry_ms(1_700_000_000.0), Some(1_700_000_000_000));
        assert_eq!(normalize_expiry_ms(0.0), Some(0));
        assert_eq!(normalize_expiry_ms(999_999_999_999.0), Some(999_999_999_999_000));
    }

    #[test]
    fn millis_are_kept() {
        assert_eq!(normalize_expiry_ms(1e12), Some(1_000_000_000_000));
        assert_eq!(
            normalize_expiry_ms(1_700_000_000_000.0),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn non_finite_expiry_is_rejected() {
        assert_eq!(normalize_expiry_ms(f64::NAN), None);
        assert_eq!(normalize_expiry_ms(f64::INFINITY), None);
        assert_eq!(normalize_expiry_ms(f64::NEG_INFINITY), None);
    }

    #[test]
    fn validate_keeps_session_until_expiry_instant() {
        let session = Session::new("tok", 1_000_000_000_000);
        assert!(validate(session.clone(), at_ms(999_999_999_999)).is_some());
        assert_eq!(
            validate(session.clone(), at_ms(1_000_000_000_000)),
            Some(session.clone())
        );
        assert_eq!(validate(session, at_ms(1_000_000_000_001)), None);
    }

    #[test]
    fn remaining_ms_goes_negative_after_expiry() {
        let session = Session::new("tok", 5_000);
        assert_eq!(session.remaining_ms(at_ms(2_000)), 3_000);
        assert_eq!(session.remaining_ms(at_ms(6_000)), -1_000);
    }

    #[test]
    fn slot_keys_are_stable() {
        let keys: Vec<_> = SessionSlot::all().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec![
                "dailybook_token",
                "dailybook_token_expiresAt",
                "dailybook_username"
            ]
        );
    }

    #[test]
    fn partial_slots_decode_as_absent() {
        let only_token = SessionSlots {
            token: Some("tok".to_string()),
            ..SessionSlots::default()
        };
        assert_eq!(only_token.decode(), SessionRead::Absent);

        let only_expiry = SessionSlots {
            expires_at: Some("1700000000000".to_string()),
            ..SessionSlots::default()
        };
        assert_eq!(only_expiry.decode(), SessionRead::Absent);

        let empty_token = SessionSlots {
            token: Some(String::new()),
            expires_at: Some("1700000000000".to_string()),
            username: None,
        };
        assert_eq!(empty_token.decode(), SessionRead::Absent);
    }

    #[test]
    fn garbage_expiry_decodes_as_corrupt() {
        for bad in ["soon", "inf", "NaN", "12abc"] {
            let slots = SessionSlots {
                token: Some("tok".to_string()),
                expires_at: Some(bad.to_string()),
                username: None,
            };
            assert_eq!(slots.decode(), SessionRead::Corrupt, "value {bad}");
        }
    }

    #[test]
    fn slots_decode_with_renormalized_expiry() {
        let slots = SessionSlots {
            token: Some("tok".to_string()),
            expires_at: Some("1700000000".to_string()),
            username: Some("alice".to_string()),
        };
        assert_eq!(
            slots.decode(),
            SessionRead::Present(
                Session::new("tok", 1_700_000_000_000).with_username("alice")
            )
        );
    }
}
