use chrono::{DateTime, Utc};

use crate::domain::value::LocationUid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertType {
    AirRaid,
    ArtilleryShelling,
    UrbanFights,
    Chemical,
    Nuclear,
    /// A type this client does not know about yet.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Oblast,
    Raion,
    Hromada,
    City,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub location_title: String,
    pub location_type: LocationType,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub alert_type: AlertType,
    pub location_uid: Option<LocationUid>,
    pub location_oblast: Option<String>,
    pub location_oblast_uid: Option<LocationUid>,
    pub location_raion: Option<String>,
    pub notes: Option<String>,
    pub calculated: Option<bool>,
}

impl Alert {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// A list of alerts together with the response metadata.
pub struct Alerts {
    pub alerts: Vec<Alert>,
    /// Raw `meta.last_updated_at` value, as sent by the server.
    pub last_updated_at: Option<String>,
    pub disclaimer: Option<String>,
}

impl Alerts {
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alert> {
        self.alerts.iter()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Alert>
    where
        P: FnMut(&Alert) -> bool,
    {
        self.alerts.iter().filter(|alert| predicate(*alert)).collect()
    }

    pub fn by_alert_type(&self, alert_type: AlertType) -> Vec<&Alert> {
        self.filter(|alert| alert.alert_type == alert_type)
    }

    pub fn by_location_type(&self, location_type: LocationType) -> Vec<&Alert> {
        self.filter(|alert| alert.location_type == location_type)
    }

    pub fn by_location_title(&self, title: &str) -> Vec<&Alert> {
        self.filter(|alert| alert.location_title == title)
    }

    /// Alerts located in the given oblast, including the oblast-level alert itself.
    pub fn by_oblast(&self, oblast_title: &str) -> Vec<&Alert> {
        self.filter(|alert| {
            alert.location_oblast.as_deref() == Some(oblast_title)
                || (alert.location_type == LocationType::Oblast
                    && alert.location_title == oblast_title)
        })
    }

    pub fn by_location_uid(&self, uid: LocationUid) -> Vec<&Alert> {
        self.filter(|alert| alert.location_uid == Some(uid))
    }

    pub fn air_raid_alerts(&self) -> Vec<&Alert> {
        self.by_alert_type(AlertType::AirRaid)
    }

    pub fn artillery_shelling_alerts(&self) -> Vec<&Alert> {
        self.by_alert_type(AlertType::ArtilleryShelling)
    }

    pub fn urban_fights_alerts(&self) -> Vec<&Alert> {
        self.by_alert_type(AlertType::UrbanFights)
    }

    pub fn chemical_alerts(&self) -> Vec<&Alert> {
        self.by_alert_type(AlertType::Chemical)
    }

    pub fn nuclear_alerts(&self) -> Vec<&Alert> {
        self.by_alert_type(AlertType::Nuclear)
    }

    pub fn oblast_alerts(&self) -> Vec<&Alert> {
        self.by_location_type(LocationType::Oblast)
    }

    pub fn raion_alerts(&self) -> Vec<&Alert> {
        self.by_location_type(LocationType::Raion)
    }

    pub fn hromada_alerts(&self) -> Vec<&Alert> {
        self.by_location_type(LocationType::Hromada)
    }

    pub fn city_alerts(&self) -> Vec<&Alert> {
        self.by_location_type(LocationType::City)
    }
}

impl IntoIterator for Alerts {
    type Item = Alert;
    type IntoIter = std::vec::IntoIter<Alert>;

    fn into_iter(self) -> Self::IntoIter {
        self.alerts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Alerts {
    type Item = &'a Alert;
    type IntoIter = std::slice::Iter<'a, Alert>;

    fn into_iter(self) -> Self::IntoIter {
        self.alerts.iter()
    }
}
