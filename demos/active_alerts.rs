use std::io;
use std::thread;
use std::time::Duration;

use alerts_in_ua::{AlertsClient, FetchOptions};
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

    // The second poll is normally served from cache via a 304.
    for round in 1..=2 {
        let alerts = client.active_alerts(FetchOptions::default())?;
        println!(
            "round {round}: {} active alerts (updated {:?})",
            alerts.len(),
            alerts.last_updated_at
        );
        for alert in alerts.air_raid_alerts() {
            println!(
                "  {:?} {} since {}",
                alert.location_type, alert.location_title, alert.started_at
            );
        }
        thread::sleep(Duration::from_secs(1));
    }

    Ok(())
}
