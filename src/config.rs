//! Configuration module
//!
//! Everything is read from the environment once at startup and validated
//! before the console opens.

use log::info;
use std::env;
use std::path::PathBuf;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::schedule::date_matcher::ReferenceZone;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_APPOINTMENTS_PATH: &str = "all-appointments";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the appointment backend
    pub api_url: Url,
    /// Path of the list endpoint, relative to `api_url`
    pub appointments_path: String,
    /// Zone used to reduce timestamps to calendar days
    pub zone: ReferenceZone,
    /// SQLite file holding the signed-in session
    pub session_db: PathBuf,
}

impl AppConfig {
    /// Reads `COUNSEL_API_URL`, `COUNSEL_APPOINTMENTS_PATH`,
    /// `COUNSEL_TIMEZONE` and `COUNSEL_SESSION_DB`.
    pub fn from_env() -> AppResult<Self> {
        let api_url = env::var("COUNSEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let appointments_path = env::var("COUNSEL_APPOINTMENTS_PATH")
            .unwrap_or_else(|_| DEFAULT_APPOINTMENTS_PATH.to_string());
        let zone = env::var("COUNSEL_TIMEZONE").unwrap_or_else(|_| "local".to_string());
        let session_db = env::var("COUNSEL_SESSION_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_db());

        let config = Self {
            api_url: parse_api_url(&api_url)?,
            appointments_path,
            zone: zone.parse().map_err(AppError::config)?,
            session_db,
        };
        config.validate()?;

        info!(
            "Configuration loaded: backend {}, zone {:?}",
            config.api_url, config.zone
        );
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "Backend URL must use http or https, got '{}'",
                self.api_url.scheme()
            )));
        }
        if self.api_url.cannot_be_a_base() || self.api_url.host_str().is_none() {
            return Err(AppError::config(format!(
                "Backend URL has no host: {}",
                self.api_url
            )));
        }
        if self.appointments_path.trim_matches('/').is_empty() {
            return Err(AppError::config("Appointments path cannot be empty"));
        }
        Ok(())
    }
}

fn parse_api_url(raw: &str) -> AppResult<Url> {
    Url::parse(raw.trim()).map_err(|e| AppError::config(format!("Invalid backend URL '{}': {}", raw, e)))
}

fn default_session_db() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("counsel-console")
        .join("session.db")
}
