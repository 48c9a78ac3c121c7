use crate::config::Credentials;
use crate::error::ReportError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience the analytics API expects in every token.
pub const AUDIENCE: &str = "appstoreconnect-v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub exp: i64,
    pub aud: String,
}

/// A signed, short-lived bearer token.
#[derive(Clone)]
pub struct SignedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl SignedToken {
    /// Sign a token for `credentials` that is valid from `now` for `ttl`.
    pub fn issue(
        credentials: &Credentials,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let expires_at = now + ttl;

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(credentials.key_id.clone());
        header.typ = Some("JWT".to_string());

        let claims = Claims {
            iss: credentials.issuer_id.clone(),
            exp: expires_at.timestamp(),
            aud: AUDIENCE.to_string(),
        };

        let key = EncodingKey::from_ec_pem(&credentials.private_key)?;
        let token = encode(&header, &claims, &key)?;
        debug!(
            "Signed token for key {} expiring at {}",
            credentials.key_id, expires_at
        );
        Ok(Self { token, expires_at })
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
