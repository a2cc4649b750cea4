use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token issued by alerts.in.ua.
///
/// Invariant: non-empty after trimming. `Debug` never prints the value.
pub struct ApiToken(String);

impl ApiToken {
    /// Field name reported in validation errors.
    pub const FIELD: &'static str = "token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Stable numeric identifier of a location (oblast, raion, hromada or city).
pub struct LocationUid(u32);

impl LocationUid {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for LocationUid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_token_trims_and_formats_bearer() {
        let token = ApiToken::new("  abc123 ").unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.bearer(), "Bearer abc123");
    }

    #[test]
    fn api_token_debug_hides_secret() {
        let token = ApiToken::new("secret").unwrap();
        assert_eq!(format!("{token:?}"), "ApiToken(***)");
    }

    #[test]
    fn location_uid_displays_as_number() {
        assert_eq!(LocationUid::new(31).to_string(), "31");
    }
}
