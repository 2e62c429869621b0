use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

use crate::error::AppError;
use crate::models::{AppointmentId, AppointmentStatus};

pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs the global logger. Call once, from the binary.
pub fn init_logging() {
    let level = parse_level(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        match record.level() {
            Level::Info => writeln!(
                buf,
                "{} [INFO] [{}]: {}",
                timestamp,
                record.target(),
                record.args()
            ),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.target(),
                record.args()
            ),
        }
    });

    // Transport crates are chatty at info
    if env::var("COUNSEL_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("sqlx", LevelFilter::Warn);
        builder.filter_module("wgpu", LevelFilter::Warn);
    }

    builder.filter_level(level).target(Target::Stdout).init();
}

pub fn log_network_error(operation: &str, error: &AppError) {
    log::warn!("[Network] {} failed: {}", operation, error);

    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        log::warn!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_appointments_loaded(count: usize, skipped: usize, duration_ms: u64) {
    log::info!(
        "[Appointments] Loaded {} appointments ({} skipped) in {}ms",
        count,
        skipped,
        duration_ms
    );
}

pub fn log_status_change(id: &AppointmentId, from: AppointmentStatus, to: AppointmentStatus) {
    log::info!("[Workflow] Appointment {} moved {} -> {}", id, from, to);
}

pub fn log_auth_event(event: &str, username: &str) {
    log::info!("[Auth] {} for user '{}'", event, username);
}
