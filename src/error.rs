use std::sync::Arc;

use thiserror::Error;

use crate::models::AppointmentStatus;

/// Coarse error classes shown to the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    InvalidTransition,
    NotFound,
    Conflict,
    AuthDenied,
    Other,
}

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),

    #[error("Backend rejected request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Appointment {id} changed to {current} while the request was in flight")]
    Conflict {
        id: String,
        current: AppointmentStatus,
    },

    #[error("Access denied: {0}")]
    AuthDenied(String),

    #[error("Database error: {0}")]
    Database(#[source] Arc<sqlx::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(Arc::new(e))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(Arc::new(e))
    }
}

impl AppError {
    pub fn backend<S: Into<String>>(status: u16, msg: S) -> Self {
        Self::Backend {
            status,
            message: msg.into(),
        }
    }

    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound(id.into())
    }

    pub fn auth_denied<S: Into<String>>(msg: S) -> Self {
        Self::AuthDenied(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Backend { .. } => ErrorKind::NetworkFailure,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::AuthDenied(_) => ErrorKind::AuthDenied,
            Self::Database(_) | Self::Config(_) | Self::InvalidInput(_) => ErrorKind::Other,
        }
    }

    /// Timeouts, dropped connections, throttling and gateway errors.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Backend { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Network(_) | Self::Database(_) => false,
            Self::Backend { .. }
            | Self::InvalidTransition { .. }
            | Self::NotFound(_)
            | Self::Conflict { .. }
            | Self::AuthDenied(_)
            | Self::Config(_)
            | Self::InvalidInput(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Network(e) if e.is_timeout() => {
                    "Request timed out. Please try again in a moment.".to_string()
                }
                Self::Network(e) if e.is_decode() => {
                    "Server sent an unreadable response.".to_string()
                }
                Self::Network(_) => "Failed to connect to server. Please try again.".to_string(),
                Self::Database(_) => "Session storage failed".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
