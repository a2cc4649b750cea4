//! Typed blocking Rust client for the alerts.in.ua air-raid alert API.
//!
//! The crate is split into a domain layer of strong types and result models, a
//! transport layer for wire-format quirks, and a small client layer that owns
//! the HTTP round-trips and the `If-Modified-Since` response cache.
//!
//! ```rust,no_run
//! use alerts_in_ua::{AlertsClient, HistoryOptions, StatusOptions};
//!
//! fn main() -> Result<(), alerts_in_ua::AlertsError> {
//!     let mut client = AlertsClient::new("...")?;
//!     let history = client.alerts_history("Харківська область", HistoryOptions::default())?;
//!     println!("{} alerts in the last week", history.len());
//!
//!     let statuses = client.air_raid_alert_statuses_by_oblast(StatusOptions::default())?;
//!     for oblast in statuses.active() {
//!         println!("air raid alert: {}", oblast.location_title);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AlertsClient, AlertsClientBuilder, AlertsError, CachedResponse, DEFAULT_HISTORY_PERIOD,
    FetchOptions, HistoryOptions, MemoryCache, ResponseCache, StatusOptions,
};
pub use domain::{
    AirRaidAlertOblastStatus, AirRaidAlertOblastStatuses, AirRaidStatus, Alert, AlertType, Alerts,
    ApiError, ApiErrorKind, ApiToken, LocationError, LocationRef, LocationType, LocationUid,
    LocationUidResolver, ValidationError,
};
