// REST client for the appointment backend
//
// GET  {base}/all-appointments          -> { "appointments": [...] }
// PUT  {base}/appointments/{id}/status  <- { "status": "Approved" }

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use url::Url;

use crate::api::AppointmentApi;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{
    normalize_records, Appointment, AppointmentId, AppointmentStatus, NormalizedBatch,
    RawAppointment,
};
use crate::utils::logging;

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    appointments: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpAppointmentApi {
    client: Client,
    base_url: Url,
    list_url: Url,
}

impl HttpAppointmentApi {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = HttpConfig::backend_api().build_client()?;
        Self::with_client(client, config.api_url.clone(), &config.appointments_path)
    }

    pub fn with_client(client: Client, base_url: Url, appointments_path: &str) -> AppResult<Self> {
        let segments: Vec<&str> = appointments_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let list_url = endpoint(&base_url, &segments)?;

        Ok(Self {
            client,
            base_url,
            list_url,
        })
    }

    pub fn list_url(&self) -> &Url {
        &self.list_url
    }

    pub fn status_url(&self, id: &AppointmentId) -> AppResult<Url> {
        endpoint(&self.base_url, &["appointments", id.as_str(), "status"])
    }
}

#[async_trait]
impl AppointmentApi for HttpAppointmentApi {
    async fn list_appointments(&self) -> AppResult<NormalizedBatch> {
        let started = Instant::now();
        log::debug!("GET {}", self.list_url);

        let response = self.client.get(self.list_url.clone()).send().await?;
        let response = ensure_success(response).await?;
        let envelope: ListEnvelope = response.json().await?;

        let batch = normalize_records(envelope.appointments);
        logging::log_appointments_loaded(
            batch.appointments.len(),
            batch.skipped,
            started.elapsed().as_millis() as u64,
        );
        Ok(batch)
    }

    async fn update_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<Option<Appointment>> {
        let url = self.status_url(id)?;
        log::debug!("PUT {} -> {}", url, status);

        let response = self
            .client
            .put(url)
            .json(&StatusBody { status })
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;

        Ok(parse_echo(&body))
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> AppResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::config(format!("Backend URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(backend_error(status, &body))
}

/// Builds the error for a non-2xx reply from its `{ "error": ... }` body.
pub(crate) fn backend_error(status: StatusCode, body: &str) -> AppError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    AppError::backend(status.as_u16(), message)
}

/// The PUT reply may be the record itself, `{ "appointment": {...} }`, or
/// just a message.
pub(crate) fn parse_echo(body: &str) -> Option<Appointment> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let record = match value.get("appointment") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };

    let raw: RawAppointment = serde_json::from_value(record).ok()?;
    Appointment::try_from(raw).ok()
}
