use std::sync::Arc;

use auth::JwtKeys;
use db::Db;
use serde::Deserialize;
use storage::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub jwt: JwtKeys,
    pub token_ttl: i64,
    pub cookie_expire_days: i64,
    pub cookie_secure: bool,
    pub store: Arc<dyn ObjectStore>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret_key: String,
    pub jwt_expires_seconds: Option<i64>,
    pub cookie_expire: Option<i64>,
    pub frontend_url: Option<String>,
    pub dashboard_url: Option<String>,
    pub environment: Option<String>,
    pub port: Option<u16>,
    pub media_root: Option<String>,
    pub media_base_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let cfg = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .expect("config");

        cfg.try_deserialize::<Settings>()
            .expect("deserialize settings")
    }

    pub fn production(&self) -> bool {
        self.environment.as_deref() == Some("production")
    }
}
