use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::AuditLogId;

/// One entry in the append-only admin audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub admin_email: String,
    pub action: AuditAction,
    pub target_id: String,
    pub target_name: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        admin_email: &str,
        action: AuditAction,
        target_id: impl fmt::Display,
        target_name: String,
        details: String,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            admin_email: admin_email.to_string(),
            action,
            target_id: target_id.to_string(),
            target_name,
            details,
            created_at: Utc::now(),
        }
    }
}

/// Moderation action recorded in the audit trail. Serialized as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "Provider Verified")]
    ProviderVerified,
    #[serde(rename = "Provider Rejected")]
    ProviderRejected,
    #[serde(rename = "Provider Activated")]
    ProviderActivated,
    #[serde(rename = "Provider Suspended")]
    ProviderSuspended,
    #[serde(rename = "Service Created")]
    ServiceCreated,
    #[serde(rename = "Service Updated")]
    ServiceUpdated,
    #[serde(rename = "Service Deleted")]
    ServiceDeleted,
}

impl AuditAction {
    pub fn label(self) -> &'static str {
        match self {
            AuditAction::ProviderVerified => "Provider Verified",
            AuditAction::ProviderRejected => "Provider Rejected",
            AuditAction::ProviderActivated => "Provider Activated",
            AuditAction::ProviderSuspended => "Provider Suspended",
            AuditAction::ServiceCreated => "Service Created",
            AuditAction::ServiceUpdated => "Service Updated",
            AuditAction::ServiceDeleted => "Service Deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Provider Verified" => Ok(AuditAction::ProviderVerified),
            "Provider Rejected" => Ok(AuditAction::ProviderRejected),
            "Provider Activated" => Ok(AuditAction::ProviderActivated),
            "Provider Suspended" => Ok(AuditAction::ProviderSuspended),
            "Service Created" => Ok(AuditAction::ServiceCreated),
            "Service Updated" => Ok(AuditAction::ServiceUpdated),
            "Service Deleted" => Ok(AuditAction::ServiceDeleted),
            other => Err(format!("invalid audit action: '{other}'")),
        }
    }
}

/// Pick a display name for an audit target: name, then business name, then
/// title, then `"Unknown"`. Blank candidates are skipped.
pub fn resolve_target_name(
    name: Option<&str>,
    business_name: Option<&str>,
    title: Option<&str>,
) -> String {
    [name, business_name, title]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

/// `Reason: {reason}` or `Reason: N/A`.
pub fn reason_details(reason: Option<&str>) -> String {
    match reason.map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) => format!("Reason: {reason}"),
        None => "Reason: N/A".to_string(),
    }
}
