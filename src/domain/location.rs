//! Location references and the static title <-> UID table.

use std::fmt;

use crate::domain::value::LocationUid;

/// First-level locations known to the API, keyed by UID.
///
/// Titles match the `location_title` values the API returns.
const LOCATIONS: &[(u32, &str)] = &[
    (3, "Хмельницька область"),
    (4, "Вінницька область"),
    (5, "Рівненська область"),
    (8, "Волинська область"),
    (9, "Дніпропетровська область"),
    (10, "Житомирська область"),
    (11, "Закарпатська область"),
    (12, "Запорізька область"),
    (13, "Івано-Франківська область"),
    (14, "Київська область"),
    (15, "Кіровоградська область"),
    (16, "Луганська область"),
    (17, "Миколаївська область"),
    (18, "Одеська область"),
    (19, "Полтавська область"),
    (20, "Сумська область"),
    (21, "Тернопільська область"),
    (22, "Харківська область"),
    (23, "Херсонська область"),
    (24, "Черкаська область"),
    (25, "Чернігівська область"),
    (26, "Чернівецька область"),
    (27, "Львівська область"),
    (28, "Донецька область"),
    (29, "Автономна Республіка Крим"),
    (30, "м. Севастополь"),
    (31, "м. Київ"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    UnknownTitle { title: String },
    UnknownUid { uid: LocationUid },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTitle { title } => write!(f, "unknown location title: {title}"),
            Self::UnknownUid { uid } => write!(f, "unknown location uid: {uid}"),
        }
    }
}

impl std::error::Error for LocationError {}

#[derive(Debug, Clone, Copy, Default)]
/// Resolves location titles to UIDs and back using the built-in table.
///
/// Lookups are exact: titles must match the API spelling, including case.
pub struct LocationUidResolver;

impl LocationUidResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_uid(&self, title: &str) -> Result<LocationUid, LocationError> {
        LOCATIONS
            .iter()
            .find(|(_, known)| *known == title)
            .map(|(uid, _)| LocationUid::new(*uid))
            .ok_or_else(|| LocationError::UnknownTitle {
                title: title.to_owned(),
            })
    }

    pub fn resolve_location_title(&self, uid: LocationUid) -> Result<&'static str, LocationError> {
        LOCATIONS
            .iter()
            .find(|(known, _)| *known == uid.get())
            .map(|(_, title)| *title)
            .ok_or(LocationError::UnknownUid { uid })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A location given either by UID or by title.
///
/// A title made only of ASCII digits (`"12"`) is treated as a UID and never
/// looked up in the table.
pub enum LocationRef {
    Uid(LocationUid),
    Name(String),
}

impl LocationRef {
    /// Resolve to a canonical UID without touching the network.
    pub fn resolve(&self, resolver: &LocationUidResolver) -> Result<LocationUid, LocationError> {
        match self {
            Self::Uid(uid) => Ok(*uid),
            Self::Name(name) => match parse_numeric_uid(name) {
                Some(uid) => Ok(uid),
                None => resolver.resolve_uid(name),
            },
        }
    }
}

fn parse_numeric_uid(value: &str) -> Option<LocationUid> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().map(LocationUid::new)
}

impl From<LocationUid> for LocationRef {
    fn from(value: LocationUid) -> Self {
        Self::Uid(value)
    }
}

impl From<u32> for LocationRef {
    fn from(value: u32) -> Self {
        Self::Uid(LocationUid::new(value))
    }
}

impl From<&str> for LocationRef {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl From<String> for LocationRef {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_title_to_uid_and_back() {
        let resolver = LocationUidResolver::new();
        let uid = resolver.resolve_uid("Харківська область").unwrap();
        assert_eq!(uid, LocationUid::new(22));
        assert_eq!(
            resolver.resolve_location_title(uid).unwrap(),
            "Харківська область"
        );
    }

    #[test]
    fn unknown_title_and_uid_are_reported() {
        let resolver = LocationUidResolver::new();
        assert_eq!(
            resolver.resolve_uid("Атлантида").unwrap_err(),
            LocationError::UnknownTitle {
                title: "Атлантида".to_owned()
            }
        );
        assert!(matches!(
            resolver.resolve_location_title(LocationUid::new(9999)),
            Err(LocationError::UnknownUid { .. })
        ));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let resolver = LocationUidResolver::new();
        assert!(resolver.resolve_uid("м. київ").is_err());
    }

    #[test]
    fn numeric_name_bypasses_table() {
        let resolver = LocationUidResolver::new();
        let by_name = LocationRef::from("12").resolve(&resolver).unwrap();
        let by_uid = LocationRef::from(12u32).resolve(&resolver).unwrap();
        assert_eq!(by_name, by_uid);

        // Not in the table, but numeric strings are taken at face value.
        let raw = LocationRef::from("777").resolve(&resolver).unwrap();
        assert_eq!(raw, LocationUid::new(777));
    }

    #[test]
    fn non_numeric_names_go_through_table() {
        let resolver = LocationUidResolver::new();
        assert!(LocationRef::from("").resolve(&resolver).is_err());
        assert!(LocationRef::from("-3").resolve(&resolver).is_err());
        assert!(LocationRef::from(" 3").resolve(&resolver).is_err());
        assert_eq!(
            LocationRef::from(String::from("м. Київ"))
                .resolve(&resolver)
                .unwrap(),
            LocationUid::new(31)
        );
    }

    #[test]
    fn table_titles_and_uids_are_unique() {
        for (idx, (uid, title)) in LOCATIONS.iter().enumerate() {
            for (other_uid, other_title) in &LOCATIONS[idx + 1..] {
                assert_ne!(uid, other_uid);
                assert_ne!(title, other_title);
            }
        }
    }
}
