//! Persistent auth state: the bearer token and the signed-in user's profile.
//!
//! Values live in a [`KeyValueStore`] under the keys `authToken` and
//! `userData`. In checksummed mode the token is wrapped as
//! `{token, checksum, timestamp}` and every read re-verifies both the
//! checksum and the age ceiling. This guards against accidental corruption,
//! not tampering; nothing is encrypted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::features::auth::model::TokenClaims;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::Role;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "userData";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

/// All keys in one JSON object on disk. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // write-then-rename so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

/// 32-bit rolling hash `h = h * 31 + c` over UTF-16 code units, as 8 hex digits
pub fn checksum(token: &str) -> String {
    let hash = token
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hex::encode((hash as u32).to_be_bytes())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenEnvelope {
    token: String,
    checksum: String,
    /// Milliseconds since the Unix epoch at write time
    timestamp: i64,
}

/// Why a stored token is or is not usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Missing,
    Corrupted,
    Expired,
    Valid(String),
}

pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
    checksummed: bool,
    max_age: Duration,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, checksummed: bool, max_age: Duration) -> Self {
        Self {
            backend,
            checksummed,
            max_age,
        }
    }

    /// In-memory checksummed store with the default 24h ceiling
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            true,
            Duration::from_secs(24 * 60 * 60),
        )
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.set_token_at(token, Utc::now())
    }

    fn set_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), StoreError> {
        if !self.checksummed {
            return self.backend.set(TOKEN_KEY, token);
        }

        let envelope = TokenEnvelope {
            token: token.to_string(),
            checksum: checksum(token),
            timestamp: now.timestamp_millis(),
        };
        self.backend
            .set(TOKEN_KEY, &serde_json::to_string(&envelope)?)
    }

    /// Usable token, or `None`. A corrupt or expired entry is deleted.
    pub fn get_token(&self) -> Option<String> {
        match self.token_state() {
            TokenState::Valid(token) => Some(token),
            _ => None,
        }
    }

    pub fn token_state(&self) -> TokenState {
        self.token_state_at(Utc::now())
    }

    fn token_state_at(&self, now: DateTime<Utc>) -> TokenState {
        let raw = match self.backend.get(TOKEN_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return TokenState::Missing,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                return TokenState::Missing;
            }
        };

        if !self.checksummed {
            return TokenState::Valid(raw);
        }

        let state = match serde_json::from_str::<TokenEnvelope>(&raw) {
            Ok(envelope) if envelope.checksum != checksum(&envelope.token) => {
                TokenState::Corrupted
            }
            Ok(envelope) => {
                let age_ms = now.timestamp_millis() - envelope.timestamp;
                if age_ms > self.max_age.as_millis() as i64 {
                    TokenState::Expired
                } else {
                    TokenState::Valid(envelope.token)
                }
            }
            Err(_) => TokenState::Corrupted,
        };

        if matches!(state, TokenState::Corrupted | TokenState::Expired) {
            // the profile belongs to the session the token carried
            tracing::debug!("Discarding stored session: {:?}", state);
            self.discard(TOKEN_KEY);
            self.discard(USER_KEY);
        }
        state
    }

    pub fn has_token(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn set_user(&self, user: &UserResponseDto) -> Result<(), StoreError> {
        self.backend.set(USER_KEY, &serde_json::to_string(user)?)
    }

    /// Stored profile; an unreadable entry is deleted and reads as `None`
    pub fn get_user(&self) -> Option<UserResponseDto> {
        let raw = self.backend.get(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("Discarding unreadable user profile: {}", e);
                self.discard(USER_KEY);
                None
            }
        }
    }

    fn discard(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!("Failed to remove stored {}: {}", key, e);
        }
    }

    /// Forget the token and the profile
    pub fn clear_auth(&self) -> Result<(), StoreError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(USER_KEY)
    }

    /// Claims of the stored token, decoded without verifying the signature
    pub fn claims(&self) -> Option<TokenClaims> {
        decode_claims(&self.get_token()?)
    }

    /// Role from the stored profile, else from the token claims
    pub fn role(&self) -> Option<Role> {
        let token = self.get_token()?;
        self.get_user()
            .map(|user| user.role)
            .or_else(|| decode_claims(&token).map(|claims| claims.role))
    }
}

/// Read the payload segment of a JWT. The server verifies signatures; the
/// client only needs the claims for display and gating.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
