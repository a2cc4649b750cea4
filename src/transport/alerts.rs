use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Alert, AlertType, Alerts, LocationType, LocationUid};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid alerts payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp in `{field}`: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransportAlertType {
    AirRaid,
    ArtilleryShelling,
    UrbanFights,
    Chemical,
    Nuclear,
    #[serde(other)]
    Other,
}

impl From<TransportAlertType> for AlertType {
    fn from(value: TransportAlertType) -> Self {
        match value {
            TransportAlertType::AirRaid => AlertType::AirRaid,
            TransportAlertType::ArtilleryShelling => AlertType::ArtilleryShelling,
            TransportAlertType::UrbanFights => AlertType::UrbanFights,
            TransportAlertType::Chemical => AlertType::Chemical,
            TransportAlertType::Nuclear => AlertType::Nuclear,
            TransportAlertType::Other => AlertType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransportLocationType {
    Oblast,
    Raion,
    Hromada,
    City,
    #[serde(other)]
    Other,
}

impl From<TransportLocationType> for LocationType {
    fn from(value: TransportLocationType) -> Self {
        match value {
            TransportLocationType::Oblast => LocationType::Oblast,
            TransportLocationType::Raion => LocationType::Raion,
            TransportLocationType::Hromada => LocationType::Hromada,
            TransportLocationType::City => LocationType::City,
            TransportLocationType::Other => LocationType::Other,
        }
    }
}

/// UIDs arrive as JSON numbers in some fields and as strings in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportUid {
    Int(u32),
    String(String),
}

impl TransportUid {
    fn into_uid(self) -> Option<LocationUid> {
        match self {
            Self::Int(value) => Some(LocationUid::new(value)),
            Self::String(value) => value.trim().parse::<u32>().ok().map(LocationUid::new),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AlertsJsonResponse {
    #[serde(default)]
    alerts: Vec<AlertJson>,
    #[serde(default)]
    meta: Option<MetaJson>,
    #[serde(default)]
    disclaimer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetaJson {
    #[serde(default)]
    last_updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlertJson {
    id: u64,
    location_title: String,
    location_type: TransportLocationType,
    started_at: String,
    #[serde(default)]
    finished_at: Option<String>,
    updated_at: String,
    alert_type: TransportAlertType,
    #[serde(default)]
    location_uid: Option<TransportUid>,
    #[serde(default)]
    location_oblast: Option<String>,
    #[serde(default)]
    location_oblast_uid: Option<TransportUid>,
    #[serde(default)]
    location_raion: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    calculated: Option<bool>,
}

pub fn decode_alerts_response(payload: Value) -> Result<Alerts, TransportError> {
    let parsed: AlertsJsonResponse = serde_json::from_value(payload)?;

    let alerts = parsed
        .alerts
        .into_iter()
        .map(decode_alert)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Alerts {
        alerts,
        last_updated_at: parsed.meta.and_then(|meta| meta.last_updated_at),
        disclaimer: parsed.disclaimer,
    })
}

fn decode_alert(alert: AlertJson) -> Result<Alert, TransportError> {
    let finished_at = match alert.finished_at {
        Some(value) => Some(parse_timestamp("finished_at", &value)?),
        None => None,
    };

    Ok(Alert {
        id: alert.id,
        location_title: alert.location_title,
        location_type: alert.location_type.into(),
        started_at: parse_timestamp("started_at", &alert.started_at)?,
        finished_at,
        updated_at: parse_timestamp("updated_at", &alert.updated_at)?,
        alert_type: alert.alert_type.into(),
        location_uid: alert.location_uid.and_then(TransportUid::into_uid),
        location_oblast: alert.location_oblast,
        location_oblast_uid: alert.location_oblast_uid.and_then(TransportUid::into_uid),
        location_raion: alert.location_raion,
        notes: alert.notes,
        calculated: alert.calculated,
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, TransportError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Some endpoints omit the offset; those values are UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| TransportError::InvalidTimestamp {
            field,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn active_payload() -> Value {
        json!({
            "alerts": [
                {
                    "id": 8757,
                    "location_title": "Луганська область",
                    "location_type": "oblast",
                    "started_at": "2022-04-04T16:45:39.000Z",
                    "finished_at": null,
                    "updated_at": "2023-10-29T18:22:37.357Z",
                    "alert_type": "air_raid",
                    "location_uid": "16",
                    "location_oblast": "Луганська область",
                    "location_oblast_uid": 16,
                    "notes": null,
                    "calculated": null
                },
                {
                    "id": 29123,
                    "location_title": "Нікопольська територіальна громада",
                    "location_type": "hromada",
                    "started_at": "2023-10-30T07:11:00.000Z",
                    "finished_at": "2023-10-30T07:41:00.000Z",
                    "updated_at": "2023-10-30T07:41:00.000Z",
                    "alert_type": "artillery_shelling",
                    "location_uid": "351",
                    "location_oblast": "Дніпропетровська область",
                    "location_oblast_uid": 9,
                    "location_raion": "Нікопольський район",
                    "notes": "Обстріл",
                    "calculated": true
                }
            ],
            "meta": {
                "last_updated_at": "2023/10/30 07:45:12 +0000",
                "type": "full"
            },
            "disclaimer": "Дані можуть відрізнятися від офіційних"
        })
    }

    #[test]
    fn decodes_alerts_with_meta() {
        let alerts = decode_alerts_response(active_payload()).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(
            alerts.last_updated_at.as_deref(),
            Some("2023/10/30 07:45:12 +0000")
        );
        assert_eq!(
            alerts.disclaimer.as_deref(),
            Some("Дані можуть відрізнятися від офіційних")
        );

        let first = &alerts.alerts[0];
        assert_eq!(first.id, 8757);
        assert_eq!(first.location_type, LocationType::Oblast);
        assert_eq!(first.alert_type, AlertType::AirRaid);
        assert_eq!(first.location_uid, Some(LocationUid::new(16)));
        assert_eq!(first.location_oblast_uid, Some(LocationUid::new(16)));
        assert_eq!(
            first.started_at,
            Utc.with_ymd_and_hms(2022, 4, 4, 16, 45, 39).unwrap()
        );
        assert!(!first.is_finished());

        let second = &alerts.alerts[1];
        assert_eq!(second.alert_type, AlertType::ArtilleryShelling);
        assert_eq!(second.location_raion.as_deref(), Some("Нікопольський район"));
        assert_eq!(second.calculated, Some(true));
        assert!(second.is_finished());
    }

    #[test]
    fn unknown_enum_values_map_to_other() {
        let payload = json!({
            "alerts": [{
                "id": 1,
                "location_title": "Десь",
                "location_type": "district",
                "started_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "alert_type": "drones"
            }]
        });
        let alerts = decode_alerts_response(payload).unwrap();
        assert_eq!(alerts.alerts[0].alert_type, AlertType::Other);
        assert_eq!(alerts.alerts[0].location_type, LocationType::Other);
        assert_eq!(alerts.alerts[0].location_uid, None);
        assert_eq!(alerts.last_updated_at, None);
    }

    #[test]
    fn accepts_timestamps_without_offset() {
        let parsed = parse_timestamp("started_at", "2024-02-03 04:05:06").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap());
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let payload = json!({
            "alerts": [{
                "id": 1,
                "location_title": "м. Київ",
                "location_type": "city",
                "started_at": "yesterday",
                "updated_at": "2024-01-01T00:00:00Z",
                "alert_type": "air_raid"
            }]
        });
        let err = decode_alerts_response(payload).unwrap_err();
        match err {
            TransportError::InvalidTimestamp { field, value } => {
                assert_eq!(field, "started_at");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_object_yields_no_alerts() {
        let alerts = decode_alerts_response(json!({})).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = decode_alerts_response(json!("ANNN")).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
