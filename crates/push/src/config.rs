//! FCM gateway configuration.

use std::time::Duration;

/// Default FCM send endpoint.
pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Default timeout for one send request.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the FCM HTTP gateway.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Server key sent as `Authorization: key=<server_key>`.
    pub server_key: String,
    /// Send endpoint; overridable for tests and emulators.
    pub endpoint: String,
    /// Per-request timeout (default: 10 s).
    pub timeout: Duration,
}

impl FcmConfig {
    pub fn new(server_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                               |
    /// |--------------------|----------|---------------------------------------|
    /// | `FCM_SERVER_KEY`   | **yes**  | --                                    |
    /// | `FCM_ENDPOINT`     | no       | `https://fcm.googleapis.com/fcm/send` |
    /// | `FCM_TIMEOUT_SECS` | no       | `10`                                  |
    ///
    /// # Panics
    ///
    /// Panics if `FCM_SERVER_KEY` is not set or is empty, or if
    /// `FCM_TIMEOUT_SECS` is not a valid integer.
    pub fn from_env() -> Self {
        let server_key =
            std::env::var("FCM_SERVER_KEY").expect("FCM_SERVER_KEY must be set in the environment");
        assert!(!server_key.is_empty(), "FCM_SERVER_KEY must not be empty");

        let endpoint =
            std::env::var("FCM_ENDPOINT").unwrap_or_else(|_| DEFAULT_FCM_ENDPOINT.to_string());

        let timeout_secs: u64 = std::env::var("FCM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("FCM_TIMEOUT_SECS must be a valid u64");

        Self {
            server_key,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_timeout() {
        let config = FcmConfig::new("key", DEFAULT_FCM_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.endpoint, "https://fcm.googleapis.com/fcm/send");
    }
}
