use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::session::Authenticator;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub auth: Authenticator,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        let auth = Authenticator::new(
            &config.admin_password,
            &config.session_secret,
            config.session_ttl_minutes,
        );
        Self {
            db: Arc::new(Mutex::new(conn)),
            config,
            auth,
        }
    }
}
