//! In-memory port implementations shared by the orchestrator tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use callguard_core::alert::{AlertRecord, NewAlertRecord, RiskLevel, ScamEvent};
use callguard_core::delivery::{DeliveryResult, NotificationMessage, TargetDelivery};
use callguard_core::error::{GatewayError, StoreError};
use callguard_core::orchestrator::{AlertOrchestrator, AlertPorts};
use callguard_core::ports::{AlertRecordStore, ContactResolver, NotificationGateway, TokenJanitor};
use callguard_core::threshold::ThresholdGate;
use callguard_core::types::DbId;

pub const USER: &str = "uid-protegee";

pub fn event(event_id: &str, level: RiskLevel, score: f64) -> ScamEvent {
    ScamEvent {
        event_id: event_id.to_string(),
        caller_number: "+15550100".to_string(),
        risk_level: level,
        model_score: score,
        transcript: Some("...your account has been compromised...".to_string()),
        model_analysis: Some("Bank impersonation".to_string()),
        occurred_at: Utc::now(),
        duration_seconds: 95,
    }
}

// ---------------------------------------------------------------------------
// Alert store
// ---------------------------------------------------------------------------

/// Alert store enforcing `(user_id, event_id)` uniqueness like the real table.
#[derive(Default)]
pub struct MemoryAlertStore {
    rows: Mutex<Vec<AlertRecord>>,
    next_id: AtomicI64,
    /// Number of upcoming lookups that pretend nothing is stored yet.
    stale_reads: AtomicUsize,
    unavailable: bool,
}

impl MemoryAlertStore {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    /// Make the next `n` lookups miss, as if they raced ahead of an insert.
    pub fn hide_next_lookups(&self, n: usize) {
        self.stale_reads.store(n, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<AlertRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn count_for(&self, user_id: &str, event_id: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.event_id == event_id)
            .count()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Backend("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AlertRecordStore for MemoryAlertStore {
    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<AlertRecord>, StoreError> {
        self.check_available()?;
        let hide = self
            .stale_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if hide {
            return Ok(None);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.event_id == event_id)
            .cloned())
    }

    async fn save(&self, record: NewAlertRecord) -> Result<AlertRecord, StoreError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.user_id == record.user_id && r.event_id == record.event_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "uq_alert_records_user_event".to_string(),
            });
        }
        let now = Utc::now();
        let saved = AlertRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: record.user_id,
            event_id: record.event_id,
            caller_number: record.caller_number,
            risk_level: record.risk_level,
            model_score: record.model_score,
            transcript: record.transcript,
            model_analysis: record.model_analysis,
            duration_seconds: record.duration_seconds,
            occurred_at: record.occurred_at,
            delivery_ref: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn attach_delivery_ref(&self, id: DbId, delivery_ref: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|r| r.id == id) {
            row.delivery_ref = Some(delivery_ref.to_string());
            row.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// Store whose inserts always collide but whose lookups never find the winner.
#[derive(Default)]
pub struct PhantomDuplicateStore;

#[async_trait]
impl AlertRecordStore for PhantomDuplicateStore {
    async fn find_by_user_and_event(
        &self,
        _user_id: &str,
        _event_id: &str,
    ) -> Result<Option<AlertRecord>, StoreError> {
        Ok(None)
    }

    async fn save(&self, _record: NewAlertRecord) -> Result<AlertRecord, StoreError> {
        Err(StoreError::UniqueViolation {
            constraint: "uq_alert_records_user_event".to_string(),
        })
    }

    async fn attach_delivery_ref(&self, _id: DbId, _delivery_ref: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Contact directory (resolver + janitor)
// ---------------------------------------------------------------------------

/// Trusted-contact tokens per protected user, plus the global token set.
#[derive(Default)]
pub struct MemoryDirectory {
    contact_tokens: Mutex<HashMap<String, Vec<String>>>,
    names: Mutex<HashMap<String, String>>,
    deletes: AtomicUsize,
    failing_deletes: bool,
}

impl MemoryDirectory {
    pub fn with_tokens(user_id: &str, tokens: &[&str]) -> Self {
        let dir = Self::default();
        dir.contact_tokens.lock().unwrap().insert(
            user_id.to_string(),
            tokens.iter().map(|t| t.to_string()).collect(),
        );
        dir
    }

    pub fn failing_deletes(mut self) -> Self {
        self.failing_deletes = true;
        self
    }

    pub fn with_name(self, user_id: &str, name: &str) -> Self {
        self.names
            .lock()
            .unwrap()
            .insert(user_id.to_string(), name.to_string());
        self
    }

    pub fn tokens(&self, user_id: &str) -> Vec<String> {
        self.contact_tokens
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactResolver for MemoryDirectory {
    async fn tokens_for_trusted_contacts(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.tokens(user_id))
    }

    async fn display_name(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.names.lock().unwrap().get(user_id).cloned())
    }
}

#[async_trait]
impl TokenJanitor for MemoryDirectory {
    async fn delete_token(&self, token: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.failing_deletes {
            return Err(StoreError::Backend("delete timed out".into()));
        }
        for tokens in self.contact_tokens.lock().unwrap().values_mut() {
            tokens.retain(|t| t != token);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Gateway that succeeds for every token except those given a failure code.
#[derive(Default)]
pub struct ScriptedGateway {
    failures: HashMap<String, String>,
    sent: Mutex<Vec<NotificationMessage>>,
    transport_down: bool,
}

impl ScriptedGateway {
    pub fn fail_token(mut self, token: &str, code: &str) -> Self {
        self.failures.insert(token.to_string(), code.to_string());
        self
    }

    pub fn transport_down() -> Self {
        Self {
            transport_down: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationGateway for ScriptedGateway {
    async fn send(&self, message: &NotificationMessage) -> Result<DeliveryResult, GatewayError> {
        message.validate()?;
        if self.transport_down {
            return Err(GatewayError::Transport("provider unreachable".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        let attempt = sent.len();

        let deliveries = message
            .targets
            .iter()
            .enumerate()
            .map(|(i, token)| match self.failures.get(token) {
                Some(code) => TargetDelivery::failed(token, code, Some(format!("{code} for {token}"))),
                None => TargetDelivery::delivered(token, format!("msg-{attempt}-{i}")),
            })
            .collect();
        Ok(DeliveryResult::from_deliveries(deliveries))
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub struct Harness {
    pub store: Arc<MemoryAlertStore>,
    pub directory: Arc<MemoryDirectory>,
    pub gateway: Arc<ScriptedGateway>,
    pub orchestrator: AlertOrchestrator,
}

pub fn harness(directory: MemoryDirectory, gateway: ScriptedGateway) -> Harness {
    harness_with_store(MemoryAlertStore::default(), directory, gateway)
}

pub fn harness_with_store(
    store: MemoryAlertStore,
    directory: MemoryDirectory,
    gateway: ScriptedGateway,
) -> Harness {
    let store = Arc::new(store);
    let directory = Arc::new(directory);
    let gateway = Arc::new(gateway);
    let orchestrator = AlertOrchestrator::new(
        ThresholdGate::default(),
        AlertPorts {
            store: store.clone(),
            contacts: directory.clone(),
            gateway: gateway.clone(),
            janitor: directory.clone(),
        },
    );
    Harness {
        store,
        directory,
        gateway,
        orchestrator,
    }
}
