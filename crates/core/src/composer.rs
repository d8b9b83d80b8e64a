//! Push notification content for a persisted alert.
//!
//! Composition is a pure function of the record, the resolved targets, and
//! the protected user's display name: the same inputs always produce the
//! same title, body, and data payload.

use std::collections::{BTreeMap, HashSet};

use crate::alert::{AlertRecord, RiskLevel};
use crate::delivery::NotificationMessage;

/// Titles keyed by risk level; anything not listed uses [`FALLBACK_TITLE`].
const TITLES: &[(RiskLevel, &str)] = &[
    (RiskLevel::Red, "🚨 URGENT: Scam Alert"),
    (RiskLevel::Yellow, "⚠️ Scam Warning"),
];

/// Title for levels without a dedicated entry.
const FALLBACK_TITLE: &str = "📞 Call Alert";

/// Name used in the body when the protected user has no display name.
const UNKNOWN_NAME: &str = "Your contact";

// Data payload keys read by the mobile clients.
pub const DATA_CALL_ID: &str = "callId";
pub const DATA_RISK_LEVEL: &str = "riskLevel";
pub const DATA_PHONE_NUMBER: &str = "phoneNumber";
pub const DATA_MODEL_ANALYSIS: &str = "modelAnalysis";
pub const DATA_RISK_SCORE_PERCENT: &str = "riskScorePercent";
pub const DATA_VICTIM_NAME: &str = "victimName";

pub fn title_for(level: RiskLevel) -> &'static str {
    TITLES
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, title)| *title)
        .unwrap_or(FALLBACK_TITLE)
}

/// Model score as a whole percentage, rounded half away from zero.
pub fn risk_score_percent(model_score: f64) -> i64 {
    (model_score * 100.0).round() as i64
}

/// `2m 5s` for durations of a minute or more, `45s` otherwise.
pub fn format_duration(duration_seconds: i32) -> String {
    let minutes = duration_seconds / 60;
    let seconds = duration_seconds % 60;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Build the notification for `record`, addressed to `targets`.
///
/// Duplicate tokens are dropped, keeping first-seen order.
pub fn compose(
    record: &AlertRecord,
    targets: &[String],
    display_name: Option<&str>,
) -> NotificationMessage {
    let mut seen = HashSet::with_capacity(targets.len());
    let targets: Vec<String> = targets
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect();

    let percent = risk_score_percent(record.model_score);
    let analysis = record
        .model_analysis
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    let mut data = BTreeMap::new();
    data.insert(DATA_CALL_ID.to_string(), record.id.to_string());
    data.insert(
        DATA_RISK_LEVEL.to_string(),
        record.risk_level.as_str().to_string(),
    );
    data.insert(DATA_PHONE_NUMBER.to_string(), record.caller_number.clone());
    data.insert(
        DATA_MODEL_ANALYSIS.to_string(),
        analysis.unwrap_or_default().to_string(),
    );
    data.insert(DATA_RISK_SCORE_PERCENT.to_string(), percent.to_string());
    if let Some(name) = display_name {
        data.insert(DATA_VICTIM_NAME.to_string(), name.to_string());
    }

    NotificationMessage {
        title: title_for(record.risk_level).to_string(),
        body: body_text(record, display_name.unwrap_or(UNKNOWN_NAME), percent, analysis),
        data,
        targets,
    }
}

fn body_text(record: &AlertRecord, name: &str, percent: i64, analysis: Option<&str>) -> String {
    let mut body = format!("🚨 {name} may be getting scammed!\n\n");
    body.push_str(&format!("📞 Caller: {}\n", record.caller_number));
    body.push_str(&format!("🎯 Risk Score: {percent}%\n"));
    if let Some(analysis) = analysis {
        body.push_str(&format!("🔍 Analysis: {analysis}\n"));
    }
    if record.duration_seconds > 0 {
        body.push_str(&format!(
            "⏱️ Call Duration: {}\n",
            format_duration(record.duration_seconds)
        ));
    }
    body.push_str("\n💡 Consider reaching out to check on them immediately.");
    body
}
