use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// Access/refresh credential pair as issued by the accounts service.
///
/// `save_time` is the Unix timestamp (seconds) at which the access secret was
/// obtained; `expires_in` is its time-to-live in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub save_time: i64,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        expires_in: u64,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
    ) -> Self {
        Token {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.into(),
            expires_in,
            save_time: Utc::now().timestamp(),
        }
    }

    pub fn with_save_time(mut self, save_time: i64) -> Self {
        self.save_time = save_time;
        self
    }

    /// Builds a token from an exchange response body.
    ///
    /// Fields are read loosely: a missing or mistyped field becomes an empty
    /// string or zero instead of failing the whole decode. The body itself must
    /// still be a JSON object.
    pub fn from_payload(data: &[u8]) -> Result<Self, DecodeError> {
        let json: Value = serde_json::from_slice(data)?;
        if !json.is_object() {
            return Err(DecodeError::NotAnObject);
        }

        Ok(Token {
            access_token: json["access_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            token_type: json["token_type"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_u64().unwrap_or(0),
            save_time: Utc::now().timestamp(),
        })
    }

    /// Applies a refresh response: only the access secret and the save time change.
    pub fn refresh(&mut self, data: &[u8]) -> Result<(), DecodeError> {
        self.refresh_at(data, Utc::now().timestamp())
    }

    pub fn refresh_at(&mut self, data: &[u8], now: i64) -> Result<(), DecodeError> {
        let fresh = Token::from_payload(data)?;
        self.access_token = fresh.access_token;
        self.save_time = now;
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now.saturating_sub(self.save_time) > self.ttl()
    }

    fn ttl(&self) -> i64 {
        i64::try_from(self.expires_in).unwrap_or(i64::MAX)
    }

    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
            && !self.refresh_token.is_empty()
            && !self.token_type.is_empty()
            && self.expires_in != 0
    }

    /// Seconds of life left at `now`; zero once expired.
    pub fn remaining_at(&self, now: i64) -> u64 {
        let left = self.save_time.saturating_add(self.ttl()).saturating_sub(now);
        u64::try_from(left).unwrap_or(0)
    }
}
