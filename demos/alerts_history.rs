use std::io;

use alerts_in_ua::{AlertsClient, HistoryOptions};
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
    // A UID ("31") or a title ("м. Київ").
    let location = std::env::args().nth(1).unwrap_or_else(|| "м. Київ".to_owned());

    let mut client = AlertsClient::new(token)?;
    let history = client.alerts_history(location, HistoryOptions::default())?;

    for alert in &history {
        println!(
            "{} {:?} {} -> {:?}",
            alert.location_title, alert.alert_type, alert.started_at, alert.finished_at
        );
    }

    Ok(())
}
