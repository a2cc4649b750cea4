//! Domain layer: strong types, location lookup and result models (no I/O).

mod air_raid;
mod alert;
mod api_error;
mod location;
mod validation;
mod value;

pub use air_raid::{
    AirRaidAlertOblastStatus, AirRaidAlertOblastStatuses, AirRaidStatus, OBLAST_STATUS_ORDER,
};
pub use alert::{Alert, AlertType, Alerts, LocationType};
pub use api_error::{ApiError, ApiErrorKind};
pub use location::{LocationError, LocationRef, LocationUidResolver};
pub use validation::ValidationError;
pub use value::{ApiToken, LocationUid};
