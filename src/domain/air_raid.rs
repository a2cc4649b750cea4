/// Oblast order of the per-character status string returned by
/// `iot/active_air_raid_alerts_by_oblast.json`.
pub const OBLAST_STATUS_ORDER: [&str; 27] = [
    "Автономна Республіка Крим",
    "Волинська область",
    "Вінницька область",
    "Дніпропетровська область",
    "Донецька область",
    "Житомирська область",
    "Закарпатська область",
    "Запорізька область",
    "Івано-Франківська область",
    "м. Київ",
    "Київська область",
    "Кіровоградська область",
    "Луганська область",
    "Львівська область",
    "Миколаївська область",
    "Одеська область",
    "Полтавська область",
    "Рівненська область",
    "м. Севастополь",
    "Сумська область",
    "Тернопільська область",
    "Харківська область",
    "Херсонська область",
    "Хмельницька область",
    "Черкаська область",
    "Чернівецька область",
    "Чернігівська область",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirRaidStatus {
    /// Alert covers the whole oblast (`A`).
    Active,
    /// Alert covers only part of the oblast (`P`).
    Partly,
    /// No alert (`N` or anything unrecognized).
    NoAlert,
}

impl AirRaidStatus {
    /// Map a wire status character.
    ///
    /// With `oblast_level_only`, a partial alert is reported as no alert.
    pub fn from_code(code: char, oblast_level_only: bool) -> Self {
        match code {
            'A' => Self::Active,
            'P' if !oblast_level_only => Self::Partly,
            _ => Self::NoAlert,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirRaidAlertOblastStatus {
    pub location_title: String,
    pub status: AirRaidStatus,
}

impl AirRaidAlertOblastStatus {
    pub fn is_active(&self) -> bool {
        self.status == AirRaidStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AirRaidAlertOblastStatuses {
    pub statuses: Vec<AirRaidAlertOblastStatus>,
}

impl AirRaidAlertOblastStatuses {
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AirRaidAlertOblastStatus> {
        self.statuses.iter()
    }

    pub fn by_status(&self, status: AirRaidStatus) -> Vec<&AirRaidAlertOblastStatus> {
        self.statuses
            .iter()
            .filter(|item| item.status == status)
            .collect()
    }

    pub fn active(&self) -> Vec<&AirRaidAlertOblastStatus> {
        self.by_status(AirRaidStatus::Active)
    }

    pub fn partly(&self) -> Vec<&AirRaidAlertOblastStatus> {
        self.by_status(AirRaidStatus::Partly)
    }

    pub fn no_alert(&self) -> Vec<&AirRaidAlertOblastStatus> {
        self.by_status(AirRaidStatus::NoAlert)
    }
}

impl<'a> IntoIterator for &'a AirRaidAlertOblastStatuses {
    type Item = &'a AirRaidAlertOblastStatus;
    type IntoIter = std::slice::Iter<'a, AirRaidAlertOblastStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.iter()
    }
}
