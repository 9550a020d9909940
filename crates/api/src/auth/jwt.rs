//! Session tokens.
//!
//! A token carries exactly what the directory needs to authorize a call: the
//! account id, its role and the linked employee. It is HS256-signed and
//! stateless, so linking an employee means issuing a new token.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use orgdir_core::roles::{Actor, Role};
use orgdir_core::types::{DbId, EmployeeId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seven days, matching the browser session lifetime.
pub const DEFAULT_SESSION_MINS: i64 = 60 * 24 * 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id.
    pub sub: DbId,
    pub role: Role,
    pub employee_id: Option<EmployeeId>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn for_actor(actor: &Actor, lifetime_mins: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: actor.account_id,
            role: actor.role,
            employee_id: actor.employee_id.clone(),
            exp: now + lifetime_mins * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn into_actor(self) -> Actor {
        Actor {
            account_id: self.sub,
            role: self.role,
            employee_id: self.employee_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` is required; `JWT_ACCESS_EXPIRY_MINS` defaults to
    /// [`DEFAULT_SESSION_MINS`].
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or an unparseable expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .unwrap_or_else(|e| panic!("JWT_ACCESS_EXPIRY_MINS is not valid ('{raw}'): {e}")),
            Err(_) => DEFAULT_SESSION_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Lifetime in seconds, as reported to clients in `expires_in`.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Sign a token that authenticates as `actor`.
pub fn issue_token(actor: &Actor, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::for_actor(actor, config.access_token_expiry_mins);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, then recover the caller.
pub fn decode_actor(token: &str, config: &JwtConfig) -> Result<Actor, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.into_actor())
}
