use std::env;

use crate::errors::AppError;

/// Thirty days.
const MAX_SESSION_TTL_MINUTES: i64 = 30 * 24 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_password: String,
    pub session_secret: String,
    pub session_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Secrets have no fallback value.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {v}")))?,
            None => 5000,
        };

        let session_ttl_minutes = match lookup("SESSION_TTL_MINUTES") {
            Some(v) => v.parse().map_err(|_| {
                AppError::Config(format!("SESSION_TTL_MINUTES is not a number: {v}"))
            })?,
            None => 480,
        };
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&session_ttl_minutes) {
            return Err(AppError::Config(format!(
                "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {session_ttl_minutes}"
            )));
        }

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "bookings.db".to_string()),
            admin_password: required(&lookup, "ADMIN_PASSWORD")?,
            session_secret: required(&lookup, "SESSION_SECRET")?,
            session_ttl_minutes,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("{key} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let env = vars(&[("ADMIN_PASSWORD", "rahasia"), ("SESSION_SECRET", "kunci")]);
        let config = AppConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "bookings.db");
        assert_eq!(config.admin_password, "rahasia");
        assert_eq!(config.session_ttl_minutes, 480);
    }

    #[test]
    fn test_missing_password_rejected() {
        let env = vars(&[("SESSION_SECRET", "kunci")]);
        let err = AppConfig::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("ADMIN_PASSWORD"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let env = vars(&[("ADMIN_PASSWORD", "rahasia"), ("SESSION_SECRET", "")]);
        assert!(AppConfig::from_vars(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_session_ttl_range_enforced() {
        for ttl in ["0", "-5", "43201", "1000000000000"] {
            let env = vars(&[
                ("ADMIN_PASSWORD", "rahasia"),
                ("SESSION_SECRET", "kunci"),
                ("SESSION_TTL_MINUTES", ttl),
            ]);
            let err = AppConfig::from_vars(|k| env.get(k).cloned()).unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_MINUTES"), "ttl {ttl}");
        }

        let env = vars(&[
            ("ADMIN_PASSWORD", "rahasia"),
            ("SESSION_SECRET", "kunci"),
            ("SESSION_TTL_MINUTES", "43200"),
        ]);
        let config = AppConfig::from_vars(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.session_ttl_minutes, 43200);
    }

    #[test]
    fn test_bad_port_rejected() {
        let env = vars(&[
            ("ADMIN_PASSWORD", "rahasia"),
            ("SESSION_SECRET", "kunci"),
            ("PORT", "lima-ribu"),
        ]);
        assert!(AppConfig::from_vars(|k| env.get(k).cloned()).is_err());
    }
}
