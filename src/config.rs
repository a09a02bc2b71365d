use anyhow::{bail, Context};
use serde::Deserialize;

/// Placeholder secret shipped in old `.env` templates. Refused at startup.
const PLACEHOLDER_SECRET: &str = "your-secret-key";

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
        let ttl_minutes = match std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(v) => v
                .trim()
                .parse::<i64>()
                .with_context(|| format!("ACCESS_TOKEN_EXPIRE_MINUTES is not a number: {v}"))?,
            Err(_) => 30,
        };
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT is not a valid port")?,
            Err(_) => 8000,
        };

        let config = Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:9090".into()),
            ),
            jwt: JwtConfig {
                secret,
                ttl_minutes,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let secret = self.jwt.secret.trim();
        if secret.is_empty() {
            bail!("SECRET_KEY must not be empty");
        }
        if secret == PLACEHOLDER_SECRET {
            bail!("SECRET_KEY is still the placeholder value; set a real secret");
        }
        if self.jwt.ttl_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }
        if self.jwt.ttl_minutes > MAX_TTL_MINUTES {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must not exceed {MAX_TTL_MINUTES}");
        }
        Ok(())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str, ttl_minutes: i64) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            jwt: JwtConfig {
                secret: secret.into(),
                ttl_minutes,
            },
        }
    }

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins(" http://a.local:9090 , ,http://b.local ");
        assert_eq!(origins, vec!["http://a.local:9090", "http://b.local"]);
    }

    #[test]
    fn validate_rejects_placeholder_and_empty_secret() {
        assert!(config_with_secret("", 30).validate().is_err());
        assert!(config_with_secret("   ", 30).validate().is_err());
        assert!(config_with_secret(PLACEHOLDER_SECRET, 30).validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_ttl() {
        assert!(config_with_secret("s3cr3t", 0).validate().is_err());
        assert!(config_with_secret("s3cr3t", -5).validate().is_err());
        assert!(config_with_secret("s3cr3t", 30).validate().is_ok());
    }

    #[test]
    fn validate_rejects_huge_ttl() {
        assert!(config_with_secret("s3cr3t", MAX_TTL_MINUTES).validate().is_ok());
        assert!(config_with_secret("s3cr3t", MAX_TTL_MINUTES + 1).validate().is_err());
        assert!(config_with_secret("s3cr3t", 10_000_000_000).validate().is_err());
        assert!(config_with_secret("s3cr3t", i64::MAX).validate().is_err());
    }
}
