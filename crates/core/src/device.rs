//! Device push-token registration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Client platform a push token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Android,
    Ios,
    Web,
    Desktop,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "ANDROID",
            Platform::Ios => "IOS",
            Platform::Web => "WEB",
            Platform::Desktop => "DESKTOP",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ANDROID" => Ok(Platform::Android),
            "IOS" => Ok(Platform::Ios),
            "WEB" => Ok(Platform::Web),
            "DESKTOP" => Ok(Platform::Desktop),
            _ => Err(CoreError::Validation(format!("Unknown platform: {s}"))),
        }
    }
}

/// A client's request to (re)register the push token of one of its devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    /// Stable client-generated identifier for the installation.
    pub device_id: String,
    /// Provider registration token.
    pub token: String,
    pub platform: Platform,
    #[serde(default)]
    pub app_version: Option<String>,
}

impl DeviceRegistration {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.device_id.trim().is_empty() {
            return Err(CoreError::Validation("deviceId must not be empty".into()));
        }
        if self.token.trim().is_empty() {
            return Err(CoreError::Validation("token must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("IOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert!("symbian".parse::<Platform>().is_err());
    }

    #[test]
    fn registration_requires_token() {
        let reg = DeviceRegistration {
            device_id: "pixel-8".into(),
            token: "".into(),
            platform: Platform::Android,
            app_version: Some("1.4.0".into()),
        };
        assert!(reg.validate().is_err());
    }
}
