use std::io;

use alerts_in_ua::{AlertsClient, AlertsError, ApiErrorKind, StatusOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("ALERTS_IN_UA_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ALERTS_IN_UA_TOKEN environment variable is required",
        )
    })?;

    let mut client = AlertsClient::new(token)?;
    let statuses = match client.air_raid_alert_statuses_by_oblast(StatusOptions::default()) {
        Ok(statuses) => statuses,
        Err(err) if err.api_kind() == Some(ApiErrorKind::RateLimit) => {
            eprintln!("rate limited, try again later: {err}");
            return Ok(());
        }
        Err(err @ AlertsError::Transport(_)) if err.is_timeout() => {
            eprintln!("request timed out: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    for status in &statuses {
        println!("{:<28} {:?}", status.location_title, status.status);
    }

    Ok(())
}
