// File: ./src/model/adapter.rs
// Handles the wire format of due dates and payload -> field conversion
use crate::model::item::{TaskFields, TaskPayload, TaskStatus, ValidationError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Accepts `YYYY-MM-DD` (midnight UTC) or any RFC 3339 timestamp.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidDueDate(raw.to_string()))
}

pub fn format_due_date(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl TryFrom<&TaskPayload> for TaskFields {
    type Error = ValidationError;

    fn try_from(payload: &TaskPayload) -> Result<Self, Self::Error> {
        let title = payload
            .title
            .clone()
            .ok_or(ValidationError::Missing("title"))?;
        let due_date = match payload.due_date.as_deref() {
            Some(raw) if !raw.is_empty() => parse_due_date(raw)?,
            _ => return Err(ValidationError::Missing("due_date")),
        };
        let status = payload
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;

        let fields = TaskFields {
            title,
            description: payload.description.clone(),
            due_date,
            status,
        };
        fields.validate()?;
        Ok(fields)
    }
}

pub mod due_date {
    use super::{format_due_date, parse_due_date};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_due_date(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_due_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskId};
    use chrono::TimeZone;

    #[test]
    fn date_only_input_is_midnight_utc() {
        let parsed = parse_due_date("2024-01-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_input_is_normalized_to_utc() {
        let parsed = parse_due_date("2024-01-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn garbage_due_date_is_a_validation_error() {
        assert_eq!(
            parse_due_date("next tuesday"),
            Err(ValidationError::InvalidDueDate("next tuesday".to_string()))
        );
    }

    #[test]
    fn task_json_shape() {
        let task = Task {
            id: TaskId::from("abc"),
            title: "Buy milk".to_string(),
            description: String::new(),
            due_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            status: TaskStatus::InProgress,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "title": "Buy milk",
                "description": "",
                "due_date": "2024-01-01T00:00:00.000Z",
                "status": "in-progress",
            })
        );
        assert_eq!(&json["due_date"].as_str().unwrap()[..10], task.due_date_input());
    }

    #[test]
    fn payload_conversion_keeps_omitted_optionals_unset() {
        let payload = TaskPayload {
            title: Some("Buy milk".to_string()),
            due_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let fields = TaskFields::try_from(&payload).unwrap();
        assert_eq!(fields.description, None);
        assert_eq!(fields.status, None);
    }

    #[test]
    fn payload_conversion_rejects_unknown_status() {
        let payload = TaskPayload {
            title: Some("Buy milk".to_string()),
            due_date: Some("2024-01-01".to_string()),
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert_eq!(
            TaskFields::try_from(&payload),
            Err(ValidationError::InvalidStatus("archived".to_string()))
        );
    }
}
