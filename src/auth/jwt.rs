use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{auth::claims::Claims, config::JwtConfig, error::AuthError};

/// Tokens are always HS256; the algorithm is not configurable.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly minted access token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub subject: String,
    pub expires_at: OffsetDateTime,
}

/// Signing and verification keys, derived once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub access_ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, access_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(
            &cfg.secret,
            Duration::from_secs((cfg.ttl_minutes.max(0) as u64).saturating_mul(60)),
        )
    }

    /// Mint an access token for `username` valid for the configured lifetime.
    pub fn sign(&self, username: &str) -> anyhow::Result<AccessToken> {
        let now = OffsetDateTime::now_utc();
        let expires_at = i64::try_from(self.access_ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .ok_or_else(|| {
                anyhow::anyhow!("token lifetime {:?} is out of range", self.access_ttl)
            })?;
        let token = self.sign_with_expiry(username, now, expires_at)?;
        Ok(AccessToken {
            token,
            subject: username.to_string(),
            expires_at,
        })
    }

    /// Mint a token with explicit issue and expiry instants.
    pub fn sign_with_expiry(
        &self,
        username: &str,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.unix_timestamp().max(0) as usize,
            exp: expires_at.unix_timestamp().max(0) as usize,
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)?;
        debug!(username = %username, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    /// Check signature, algorithm, required claims and expiry (no leeway).
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(username = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => {
                    debug!("jwt expired");
                    Err(AuthError::TokenExpired)
                }
                kind => {
                    warn!(reason = ?kind, "jwt rejected");
                    Err(AuthError::InvalidToken)
                }
            },
        }
    }
}
