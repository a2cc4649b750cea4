//! Transport layer: wire-format details (JSON payloads and error bodies).

mod air_raid;
mod alerts;
mod api_error;

pub use air_raid::{decode_oblast_status, decode_oblast_statuses};
pub use alerts::decode_alerts_response;
pub use api_error::decode_api_error;
