use std::fmt;
use std::str::FromStr;

/// Grant status of an app-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Allowed,
}

/// Power state of the Bluetooth radio as observed by the nursery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioState {
    /// Not observed yet.
    #[default]
    Unknown,
    PoweredOn,
    PoweredOff,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised status value: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for AuthorizationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_determined" | "notdetermined" | "" => Ok(Self::NotDetermined),
            "denied" => Ok(Self::Denied),
            "allowed" | "granted" => Ok(Self::Allowed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl FromStr for RadioState {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" | "" => Ok(Self::Unknown),
            "on" | "powered_on" => Ok(Self::PoweredOn),
            "off" | "powered_off" => Ok(Self::PoweredOff),
            "unsupported" => Ok(Self::Unsupported),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotDetermined => "not_determined",
            Self::Denied => "denied",
            Self::Allowed => "allowed",
        })
    }
}
