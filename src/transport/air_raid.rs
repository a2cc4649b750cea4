use serde_json::Value;

use crate::domain::{
    AirRaidAlertOblastStatus, AirRaidAlertOblastStatuses, AirRaidStatus, OBLAST_STATUS_ORDER,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("expected air raid status string, got: {0}")]
    NotAString(Value),
}

fn status_string(payload: &Value) -> Result<&str, TransportError> {
    payload
        .as_str()
        .ok_or_else(|| TransportError::NotAString(payload.clone()))
}

/// Decode `iot/active_air_raid_alerts/<uid>.json`, a one-character string.
pub fn decode_oblast_status(
    location_title: &str,
    payload: &Value,
    oblast_level_only: bool,
) -> Result<AirRaidAlertOblastStatus, TransportError> {
    let code = status_string(payload)?.chars().next().unwrap_or('N');
    Ok(AirRaidAlertOblastStatus {
        location_title: location_title.to_owned(),
        status: AirRaidStatus::from_code(code, oblast_level_only),
    })
}

/// Decode `iot/active_air_raid_alerts_by_oblast.json`, one character per oblast
/// in [`OBLAST_STATUS_ORDER`].
///
/// With `oblast_level_only`, only oblasts under a full alert are kept.
pub fn decode_oblast_statuses(
    payload: &Value,
    oblast_level_only: bool,
) -> Result<AirRaidAlertOblastStatuses, TransportError> {
    let statuses = status_string(payload)?
        .chars()
        .zip(OBLAST_STATUS_ORDER)
        .map(|(code, title)| AirRaidAlertOblastStatus {
            location_title: title.to_owned(),
            status: AirRaidStatus::from_code(code, oblast_level_only),
        })
        .filter(|item| !oblast_level_only || item.status == AirRaidStatus::Active)
        .collect();

    Ok(AirRaidAlertOblastStatuses { statuses })
}
