//! Expiry-aware bearer tokens.

use chrono::{DateTime, FixedOffset, Utc};

use crate::api::{ApiResponse, Error, Result};

/// Response header carrying the bearer value.
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Expiry layout reported by the auth endpoint,
/// e.g. `2024-05-01T12:30:45.123456+00:00`.
const EXPIRES_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// An authentication token as issued by `POST v3/auth/tokens`.
///
/// Immutable once built; the client replaces it wholesale when it expires.
/// The bearer value comes from the `X-Subject-Token` response header (empty
/// when the header is missing) and the expiry from the `token.expires_at`
/// field of the JSON body.
#[derive(Debug, Clone)]
pub struct AuthToken {
    value: String,
    expires_at: Option<DateTime<FixedOffset>>,
}

impl AuthToken {
    /// Build a token from the auth response.
    ///
    /// Fails with [`Error::Auth`] when the status is outside the 2xx range,
    /// the body is empty, or the body is not JSON. A missing or unparseable
    /// `expires_at` is not a construction error; it yields a token that is
    /// never valid.
    pub fn from_response(response: &ApiResponse) -> Result<Self> {
        let value = response
            .header(SUBJECT_TOKEN_HEADER)
            .unwrap_or_default()
            .to_string();

        if !response.status.is_success() {
            return Err(Error::Auth(format!(
                "authorization status code error, code was {}, expects 20x",
                response.status.as_u16()
            )));
        }
        if response.body.is_empty() {
            return Err(Error::Auth(
                "cannot build token from empty response".to_string(),
            ));
        }

        let description: serde_json::Value = serde_json::from_slice(&response.body)
            .map_err(|e| Error::Auth(format!("json parsing error while parsing token: {e}")))?;

        let expires_at = description
            .pointer("/token/expires_at")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_str(s, EXPIRES_AT_FORMAT).ok());

        Ok(Self { value, expires_at })
    }

    /// True while the current time has not passed the expiry the API
    /// reported. A token without a parseable expiry is never valid.
    pub fn is_valid(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() <= expires_at.with_timezone(&Utc),
            None => false,
        }
    }

    /// Raw bearer value for the `X-Auth-Token` request header.
    pub fn to_header(&self) -> &str {
        &self.value
    }
}
