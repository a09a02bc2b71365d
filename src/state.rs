use crate::auth::{jwt::JwtKeys, repo::UserStore};
use crate::config::AppConfig;
use std::sync::Arc;

/// Everything a request handler can reach. Cloning is cheap; the user store is
/// shared between clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserStore,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self::from_parts(Arc::new(config), UserStore::new(), keys)
    }

    pub fn from_parts(config: Arc<AppConfig>, users: UserStore, keys: JwtKeys) -> Self {
        Self {
            config,
            users,
            keys,
        }
    }

    /// State with a fixed test secret and an empty store.
    pub fn fake() -> Self {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec!["http://localhost:9090".into()],
            jwt: crate::config::JwtConfig {
                secret: "test-secret-key-for-testing-only".into(),
                ttl_minutes: 30,
            },
        };
        Self::from_config(config)
    }
}
