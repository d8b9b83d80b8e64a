//! FCM HTTP gateway.
//!
//! One [`NotificationMessage`] becomes exactly one HTTP request: a single
//! target is addressed with `to`, several with `registration_ids` so the
//! provider fans out. The provider answers with one result per target, in
//! request order, which [`parse_send_response`] turns into a
//! [`DeliveryResult`]. Sends are not retried here.

use std::collections::BTreeMap;

use async_trait::async_trait;
use callguard_core::delivery::{DeliveryResult, NotificationMessage, TargetDelivery};
use callguard_core::error::GatewayError;
use callguard_core::ports::NotificationGateway;
use serde::{Deserialize, Serialize};

use crate::config::FcmConfig;

/// Error code recorded for a result entry carrying neither id nor error.
const UNKNOWN_ERROR: &str = "UNKNOWN";

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registration_ids: Option<&'a [String]>,
    priority: &'static str,
    notification: WireNotification<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct WireNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    results: Vec<SendResult>,
}

#[derive(Debug, Deserialize)]
struct SendResult {
    message_id: Option<String>,
    error: Option<String>,
}

/// Build the request body for `message`.
fn request_body(message: &NotificationMessage) -> SendRequest<'_> {
    let (to, registration_ids) = match message.targets.as_slice() {
        [single] => (Some(single.as_str()), None),
        many => (None, Some(many)),
    };
    SendRequest {
        to,
        registration_ids,
        priority: "high",
        notification: WireNotification {
            title: &message.title,
            body: &message.body,
        },
        data: &message.data,
    }
}

/// Interpret a 2xx response body for the given targets.
///
/// The provider must return exactly one result per target.
pub fn parse_send_response(
    targets: &[String],
    body: &str,
) -> Result<DeliveryResult, GatewayError> {
    let response: SendResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

    if response.results.len() != targets.len() {
        return Err(GatewayError::MalformedResponse(format!(
            "expected {} results, got {}",
            targets.len(),
            response.results.len()
        )));
    }

    let deliveries = targets
        .iter()
        .zip(response.results)
        .map(|(token, result)| match (result.message_id, result.error) {
            (Some(id), None) => TargetDelivery::delivered(token, id),
            (_, Some(code)) => TargetDelivery::failed(token, code, None),
            (None, None) => TargetDelivery::failed(
                token,
                UNKNOWN_ERROR,
                Some("result carried neither message_id nor error".to_string()),
            ),
        })
        .collect();

    Ok(DeliveryResult::from_deliveries(deliveries))
}

// ---------------------------------------------------------------------------
// FcmGateway
// ---------------------------------------------------------------------------

/// Sends composed alerts through FCM.
pub struct FcmGateway {
    client: reqwest::Client,
    config: FcmConfig,
}

impl FcmGateway {
    /// Create a gateway with an HTTP client bounded by `config.timeout`.
    pub fn new(config: FcmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl NotificationGateway for FcmGateway {
    async fn send(&self, message: &NotificationMessage) -> Result<DeliveryResult, GatewayError> {
        if let Err(e) = message.validate() {
            tracing::warn!(error = %e, "Refusing to send invalid notification");
            return Err(e);
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.config.server_key),
            )
            .json(&request_body(message))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "FCM request failed");
                GatewayError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "FCM rejected the send request");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(Box::new(e)))?;
        let result = parse_send_response(&message.targets, &body)?;

        tracing::info!(
            recipients = result.total,
            succeeded = result.success,
            invalid = result.invalid_tokens.len(),
            "Sent FCM notification"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
