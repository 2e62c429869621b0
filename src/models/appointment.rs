// file: src/models/appointment.rs
//
// Canonical appointment record plus the wire shapes the backend has used
// over time. Everything entering the core goes through `Appointment::try_from`.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::error::AppError;
use crate::models::AppointmentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppointmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// When the appointment takes place.
///
/// A plain calendar date keeps date-only semantics and is never shifted by a
/// time zone. A full timestamp is reduced to a calendar day in the reference
/// zone when compared (see `schedule::date_matcher`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentDate {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl AppointmentDate {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let s = raw.trim();

        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(AppointmentDate::Day(day));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(AppointmentDate::Instant(dt.with_timezone(&Utc)));
        }
        // HTTP-date style timestamps ("Wed, 01 May 2024 00:00:00 GMT")
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Ok(AppointmentDate::Instant(dt.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(AppointmentDate::Instant(naive.and_utc()));
            }
        }

        Err(format!("Unrecognized date: {}", raw))
    }
}

impl From<NaiveDate> for AppointmentDate {
    fn from(day: NaiveDate) -> Self {
        AppointmentDate::Day(day)
    }
}

/// Who asked for the appointment. Older backends only send a raw user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requester {
    Profile {
        username: Option<String>,
        id_number: Option<String>,
    },
    UserId(String),
    Unknown,
}

impl Requester {
    pub fn display(&self) -> String {
        match self {
            Requester::Profile { username, id_number } => format!(
                "{} ({})",
                username.as_deref().unwrap_or("Unknown"),
                id_number.as_deref().unwrap_or("N/A")
            ),
            Requester::UserId(id) => format!("User {}", id),
            Requester::Unknown => "Unknown (N/A)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: AppointmentDate,
    pub preferred_time: String,
    pub concern_type: String,
    pub requester: Requester,
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Minimal record, mostly useful for fixtures.
    pub fn new<I: Into<AppointmentId>>(
        id: I,
        date: impl Into<AppointmentDate>,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            preferred_time: String::new(),
            concern_type: String::new(),
            requester: Requester::Unknown,
            status,
            created_at: None,
        }
    }
}

// --- Wire shapes ---

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
            RawId::Oid { oid } => oid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUserInfo {
    pub username: Option<String>,
    #[serde(alias = "idNumber")]
    pub id_number: Option<String>,
}

/// One appointment as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAppointment {
    #[serde(alias = "_id")]
    pub id: Option<RawId>,
    pub date: Option<String>,
    #[serde(alias = "preferredTime")]
    pub preferred_time: Option<String>,
    #[serde(alias = "concernType")]
    pub concern_type: Option<String>,
    #[serde(alias = "userInfo")]
    pub user_info: Option<RawUserInfo>,
    #[serde(alias = "userId")]
    pub user_id: Option<RawId>,
    pub status: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
}

impl TryFrom<RawAppointment> for Appointment {
    type Error = AppError;

    fn try_from(raw: RawAppointment) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .map(RawId::into_string)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::invalid_input("appointment without id"))?;

        let status_str = raw
            .status
            .ok_or_else(|| AppError::invalid_input(format!("appointment {} has no status", id)))?;
        let status = status_str
            .parse::<AppointmentStatus>()
            .map_err(|e| AppError::invalid_input(format!("appointment {}: {}", id, e)))?;

        let date_str = raw
            .date
            .ok_or_else(|| AppError::invalid_input(format!("appointment {} has no date", id)))?;
        let date = AppointmentDate::parse(&date_str)
            .map_err(|e| AppError::invalid_input(format!("appointment {}: {}", id, e)))?;

        let requester = match (raw.user_info, raw.user_id) {
            (Some(info), _) => Requester::Profile {
                username: info.username,
                id_number: info.id_number,
            },
            (None, Some(user_id)) => Requester::UserId(user_id.into_string()),
            (None, None) => Requester::Unknown,
        };

        // Display-only; an unreadable value is dropped rather than rejecting the record.
        let created_at = raw
            .created_at
            .and_then(|s| AppointmentDate::parse(&s).ok())
            .map(|d| match d {
                AppointmentDate::Instant(ts) => ts,
                AppointmentDate::Day(day) => day.and_time(chrono::NaiveTime::MIN).and_utc(),
            });

        Ok(Appointment {
            id: AppointmentId::new(id),
            date,
            preferred_time: raw.preferred_time.unwrap_or_default(),
            concern_type: raw.concern_type.unwrap_or_default(),
            requester,
            status,
            created_at,
        })
    }
}

/// Result of normalizing a list payload.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub appointments: Vec<Appointment>,
    pub skipped: usize,
}

/// Normalizes every record, keeping the payload order. Records that cannot be
/// represented are logged and counted, never passed through.
pub fn normalize_records(records: Vec<serde_json::Value>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in records {
        let parsed = serde_json::from_value::<RawAppointment>(record)
            .map_err(|e| AppError::invalid_input(format!("malformed appointment: {}", e)))
            .and_then(Appointment::try_from);

        match parsed {
            Ok(appointment) => batch.appointments.push(appointment),
            Err(e) => {
                log::warn!("Skipping appointment record: {}", e);
                batch.skipped += 1;
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_date_parsing_forms() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(AppointmentDate::parse("2024-05-01"), Ok(AppointmentDate::Day(day)));

        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        assert_eq!(
            AppointmentDate::parse("2024-05-01T14:30:00Z"),
            Ok(AppointmentDate::Instant(expected))
        );
        assert_eq!(
            AppointmentDate::parse("2024-05-01T16:30:00+02:00"),
            Ok(AppointmentDate::Instant(expected))
        );
        assert_eq!(
            AppointmentDate::parse("Wed, 01 May 2024 14:30:00 GMT"),
            Ok(AppointmentDate::Instant(expected))
        );
        assert_eq!(
            AppointmentDate::parse("2024-05-01T14:30:00.000"),
            Ok(AppointmentDate::Instant(expected))
        );
        assert!(AppointmentDate::parse("next tuesday").is_err());
    }

    #[test]
    fn test_normalize_user_info_shape() {
        let raw: RawAppointment = serde_json::from_value(json!({
            "_id": "6630f1",
            "date": "2024-05-01",
            "preferred_time": "10:00 AM",
            "concern_type": "Academic",
            "user_info": { "username": "alice", "id_number": "TUPT-21-0001" },
            "status": "Pending",
            "created_at": "2024-04-20T08:00:00Z"
        }))
        .unwrap();

        let appt = Appointment::try_from(raw).unwrap();
        assert_eq!(appt.id.as_str(), "6630f1");
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.preferred_time, "10:00 AM");
        assert_eq!(appt.requester.display(), "alice (TUPT-21-0001)");
        assert!(appt.created_at.is_some());
    }

    #[test]
    fn test_normalize_raw_user_id_shape() {
        let raw: RawAppointment = serde_json::from_value(json!({
            "id": 42,
            "date": "2024-05-01",
            "preferredTime": "1:00 PM",
            "concernType": "Personal",
            "userId": { "$oid": "abc123" },
            "status": "Approved"
        }))
        .unwrap();

        let appt = Appointment::try_from(raw).unwrap();
        assert_eq!(appt.id.as_str(), "42");
        assert_eq!(appt.requester, Requester::UserId("abc123".to_string()));
        assert_eq!(appt.requester.display(), "User abc123");
        assert_eq!(appt.concern_type, "Personal");
        assert!(appt.created_at.is_none());
    }

    #[test]
    fn test_profile_display_fallbacks() {
        let requester = Requester::Profile {
            username: None,
            id_number: None,
        };
        assert_eq!(requester.display(), "Unknown (N/A)");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let raw: RawAppointment = serde_json::from_value(json!({
            "_id": "x1",
            "date": "2024-05-01",
            "status": "Archived"
        }))
        .unwrap();

        assert!(Appointment::try_from(raw).is_err());
    }

    #[test]
    fn test_normalize_records_skips_bad_rows_and_keeps_order() {
        let batch = normalize_records(vec![
            json!({ "_id": "a", "date": "2024-05-01", "status": "Pending" }),
            json!({ "_id": "b", "date": "garbage", "status": "Pending" }),
            json!("not an object"),
            json!({ "_id": "c", "date": "2024-05-02", "status": "Completed" }),
            json!({ "date": "2024-05-02", "status": "Completed" }),
        ]);

        let ids: Vec<&str> = batch.appointments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(batch.skipped, 3);
    }
}
