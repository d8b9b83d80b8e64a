//! Profile data a user publishes to their trusted contacts.

use serde::Deserialize;

use crate::error::CoreError;

/// Longest display name accepted; it is shown verbatim in alert bodies.
pub const MAX_DISPLAY_NAME_LEN: usize = 80;

/// Body of a profile setup or update. Replaces the stored profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), CoreError> {
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("displayName must not be empty".into()));
        }
        if name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "displayName must be at most {MAX_DISPLAY_NAME_LEN} characters"
            )));
        }
        if let Some(phone) = &self.phone_number {
            if !is_e164(phone) {
                return Err(CoreError::Validation(format!(
                    "phoneNumber must be in E.164 format, got {phone}"
                )));
            }
        }
        Ok(())
    }

    /// Display name with surrounding whitespace removed.
    pub fn display_name(&self) -> &str {
        self.display_name.trim()
    }
}

/// `+` followed by 8 to 15 digits, the first non-zero.
fn is_e164(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (8..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}
