//! Persisted session store with lazy expiry.
//!
//! The store owns the session slots in a [`SessionStorage`] and checks
//! expiry against a [`Clock`] on every read. An expired or corrupted
//! session is wiped the moment it is read; callers only ever observe a
//! valid session or nothing.
//!
//! The three slots are written and read as a unit: every operation holds
//! the store's lock across all of its storage calls, so a reader never
//! pairs one session's token with another session's expiry.

use dailybook_domain::{
    DEFAULT_SESSION_LIFETIME_MS, Session, SessionRead, SessionSlot, SessionSlots,
    normalize_expiry_ms, validate,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::ports::{Clock, SessionStorage, StorageError};

/// Session store over a storage medium and a clock.
#[derive(Debug)]
pub struct TokenStore<S, C> {
    storage: S,
    clock: C,
    slots: RwLock<()>,
}

impl<S: SessionStorage, C: Clock> TokenStore<S, C> {
    /// Creates a token store.
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            slots: RwLock::new(()),
        }
    }

    /// Returns the underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the clock expiry is checked against.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Persists a new session, overwriting any previous one.
    ///
    /// `expires_at_raw` is normalized to milliseconds; a non-finite value
    /// yields a session that lasts [`DEFAULT_SESSION_LIFETIME_MS`]. An
    /// empty or missing `username` removes the stored one.
    ///
    /// # Errors
    /// Returns an error if the storage medium fails.
    pub async fn store(
        &self,
        token: &str,
        expires_at_raw: f64,
        username: Option<&str>,
    ) -> Result<Session, StorageError> {
        let expires_at_ms = normalize_expiry_ms(expires_at_raw).unwrap_or_else(|| {
            self.clock
                .now_ms()
                .saturating_add(DEFAULT_SESSION_LIFETIME_MS)
        });
        let username = username.filter(|u| !u.is_empty());

        let _guard = self.slots.write().await;
        self.storage.set(SessionSlot::Token.key(), token).await?;
        self.storage
            .set(SessionSlot::ExpiresAt.key(), &expires_at_ms.to_string())
            .await?;
        match username {
            Some(name) => self.storage.set(SessionSlot::Username.key(), name).await?,
            None => self.storage.remove(SessionSlot::Username.key()).await?,
        }

        debug!(expires_at_ms, "session stored");
        Ok(Session {
            token: token.to_string(),
            expires_at_ms,
            username: username.map(str::to_string),
        })
    }

    /// Returns the current session if it is still valid.
    ///
    /// Expired and corrupted sessions are cleared as a side effect.
    /// Storage read failures are logged and reported as no session.
    pub async fn current_session(&self) -> Option<Session> {
        let _guard = self.slots.write().await;
        let slots = match self.read_slots().await {
            Ok(slots) => slots,
            Err(e) => {
                warn!(error = %e, "failed to read session, treating as logged out");
                return None;
            }
        };

        match slots.decode() {
            SessionRead::Absent => None,
            SessionRead::Corrupt => {
                warn!("discarding session with corrupt expiry");
                self.discard().await;
                None
            }
            SessionRead::Present(session) => {
                let valid = validate(session, self.clock.now());
                if valid.is_none() {
                    debug!("session expired");
                    self.discard().await;
                }
                valid
            }
        }
    }

    /// Returns the bearer token if a valid session exists.
    ///
    /// Same side effects as [`TokenStore::current_session`].
    pub async fn get_valid_token(&self) -> Option<String> {
        self.current_session().await.map(|s| s.token)
    }

    /// Removes token, expiry and username. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the storage medium fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.slots.write().await;
        self.clear_slots().await
    }

    /// Returns the stored display name, without checking expiry.
    pub async fn username(&self) -> Option<String> {
        let _guard = self.slots.read().await;
        self.read_slot(SessionSlot::Username).await
    }

    /// Returns the stored expiry in milliseconds, without checking it.
    ///
    /// `None` if the slot is empty or does not hold a number.
    pub async fn expires_at_ms(&self) -> Option<i64> {
        let _guard = self.slots.read().await;
        self.read_slot(SessionSlot::ExpiresAt)
            .await
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .and_then(normalize_expiry_ms)
    }

    /// Reports the session state without modifying storage.
    pub async fn status(&self) -> TokenStatus {
        let _guard = self.slots.read().await;
        let Ok(slots) = self.read_slots().await else {
            return TokenStatus::NotAuthenticated;
        };
        match slots.decode() {
            SessionRead::Absent => TokenStatus::NotAuthenticated,
            SessionRead::Corrupt => TokenStatus::Expired,
            SessionRead::Present(session) => {
                let now = self.clock.now();
                if session.is_expired_at(now) {
                    TokenStatus::Expired
                } else {
                    TokenStatus::Valid {
                        remaining_ms: session.remaining_ms(now),
                    }
                }
            }
        }
    }

    async fn read_slots(&self) -> Result<SessionSlots, StorageError> {
        Ok(SessionSlots {
            token: self.storage.get(SessionSlot::Token.key()).await?,
            expires_at: self.storage.get(SessionSlot::ExpiresAt.key()).await?,
            username: self.storage.get(SessionSlot::Username.key()).await?,
        })
    }

    async fn read_slot(&self, slot: SessionSlot) -> Option<String> {
        match self.storage.get(slot.key()).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = slot.key(), error = %e, "failed to read session slot");
                None
            }
        }
    }

    async fn clear_slots(&self) -> Result<(), StorageError> {
        self.storage.clear().await?;
        debug!("session cleared");
        Ok(())
    }

    /// Clears an invalid session. The caller holds the write lock.
    async fn discard(&self) {
        if let Err(e) = self.clear_slots().await {
            warn!(error = %e, "failed to clear invalid session");
        }
    }
}

/// Status of the stored session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No session is stored.
    NotAuthenticated,
    /// A session is stored and has not expired.
    Valid {
        /// Milliseconds until expiry.
        remaining_ms: i64,
    },
    /// A session is stored but expired or unreadable. It will be cleared
    /// on the next token read.
    Expired,
}

impl TokenStatus {
    /// Returns true if the session can be used.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not authenticated".to_string(),
            Self::Valid { remaining_ms } => {
                let secs = remaining_ms / 1000;
                if secs > 86_400 {
                    format!("Valid for {} days", secs / 86_400)
                } else if secs > 3600 {
                    format!("Valid for {} hours", secs / 3600)
                } else if secs > 60 {
                    format!("Valid for {} minutes", secs / 60)
                } else {
                    format!("Valid for {secs} seconds")
                }
            }
            Self::Expired => "Expired".to_string(),
        }
    }
}
