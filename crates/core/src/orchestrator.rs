//! End-to-end handling of a reported scam-call event.
//!
//! [`AlertOrchestrator::handle`] runs one linear pass per event:
//!
//! ```text
//! dedup -> threshold -> persist -> resolve -> compose -> send
//!       -> attach delivery ref -> clean up dead tokens -> classify
//! ```
//!
//! At most one record exists per `(user_id, event_id)`. The store's unique
//! constraint is the authority for that; a losing concurrent insert is
//! treated as a replay of the winner, so a second send is never issued.

use std::sync::Arc;

use crate::alert::{AlertRecord, NewAlertRecord, ScamEvent};
use crate::composer::compose;
use crate::error::{AlertError, StoreError};
use crate::outcome::{classify, AlertResponse};
use crate::ports::{AlertRecordStore, ContactResolver, NotificationGateway, TokenJanitor};
use crate::threshold::ThresholdGate;

/// Collaborators the orchestrator is wired with.
#[derive(Clone)]
pub struct AlertPorts {
    pub store: Arc<dyn AlertRecordStore>,
    pub contacts: Arc<dyn ContactResolver>,
    pub gateway: Arc<dyn NotificationGateway>,
    pub janitor: Arc<dyn TokenJanitor>,
}

/// Turns reported events into trusted-contact notifications.
#[derive(Clone)]
pub struct AlertOrchestrator {
    gate: ThresholdGate,
    ports: AlertPorts,
}

/// Result of the persist step.
enum Persisted {
    Created(AlertRecord),
    /// Another call stored the same event first.
    Existing(AlertRecord),
}

impl AlertOrchestrator {
    pub fn new(gate: ThresholdGate, ports: AlertPorts) -> Self {
        Self { gate, ports }
    }

    pub fn gate(&self) -> &ThresholdGate {
        &self.gate
    }

    /// Process one event reported by `user_id`.
    ///
    /// Domain outcomes come back as an [`AlertResponse`] reason. Store and
    /// gateway failures are returned as [`AlertError`] without retry.
    pub async fn handle(
        &self,
        user_id: &str,
        event: &ScamEvent,
    ) -> Result<AlertResponse, AlertError> {
        if let Some(existing) = self
            .ports
            .store
            .find_by_user_and_event(user_id, &event.event_id)
            .await?
        {
            tracing::debug!(alert_id = existing.id, event_id = %event.event_id, "Replayed event");
            return Ok(replay(&existing));
        }

        let propagate = self.gate.allows(event.model_score, event.risk_level);

        let saved = match self.persist(NewAlertRecord::from_event(user_id, event)).await? {
            Persisted::Created(record) => record,
            Persisted::Existing(record) => return Ok(replay(&record)),
        };

        if !propagate {
            tracing::info!(
                alert_id = saved.id,
                event_id = %event.event_id,
                model_score = event.model_score,
                risk_level = %event.risk_level,
                min_score = self.gate.min_score(),
                "Alert below threshold, stored without notifying"
            );
            return Ok(AlertResponse::below_threshold(saved.id));
        }

        let tokens = self
            .ports
            .contacts
            .tokens_for_trusted_contacts(user_id)
            .await?;
        if tokens.is_empty() {
            tracing::info!(alert_id = saved.id, user_id, "No trusted-contact devices to notify");
            return Ok(AlertResponse::no_contacts(saved.id));
        }

        let display_name = match self.ports.contacts.display_name(user_id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Display name lookup failed, using fallback");
                None
            }
        };

        let message = compose(&saved, &tokens, display_name.as_deref());
        let result = self.ports.gateway.send(&message).await?;

        let delivery_ref = result.delivery_ref();
        let attached = self
            .ports
            .store
            .attach_delivery_ref(saved.id, &delivery_ref)
            .await;

        tracing::info!(
            alert_id = saved.id,
            event_id = %event.event_id,
            recipients = result.total,
            delivered = result.success,
            invalid = result.invalid_tokens.len(),
            delivery_ref = %delivery_ref,
            "Alert delivery summary"
        );

        self.remove_invalid_tokens(&result.invalid_tokens).await;
        attached?;

        Ok(classify(
            saved.id,
            result.total,
            result.success,
            result.invalid_tokens.len(),
        ))
    }

    /// Insert the record, treating a unique violation as "already stored".
    async fn persist(&self, record: NewAlertRecord) -> Result<Persisted, AlertError> {
        let user_id = record.user_id.clone();
        let event_id = record.event_id.clone();

        match self.ports.store.save(record).await {
            Ok(saved) => Ok(Persisted::Created(saved)),
            Err(StoreError::UniqueViolation { constraint }) => {
                tracing::warn!(
                    user_id = %user_id,
                    event_id = %event_id,
                    constraint = %constraint,
                    "Concurrent duplicate event, resolving to the stored record"
                );
                let existing = self
                    .ports
                    .store
                    .find_by_user_and_event(&user_id, &event_id)
                    .await?;
                existing
                    .map(Persisted::Existing)
                    .ok_or(AlertError::UnresolvedDuplicate { event_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort deletion; failures are logged and never change the outcome.
    async fn remove_invalid_tokens(&self, tokens: &[String]) {
        for token in tokens {
            if let Err(e) = self.ports.janitor.delete_token(token).await {
                tracing::warn!(error = %e, "Failed to delete invalid device token");
            }
        }
    }
}

fn replay(existing: &AlertRecord) -> AlertResponse {
    AlertResponse::replay(existing.id, existing.delivery_ref.is_some())
}
