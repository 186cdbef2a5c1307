use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::{ProviderId, ServiceRequestId, UserId};

pub const SERVICE_TYPES: [&str; 12] = [
    "Boundary Dispute Resolution",
    "Property Title Verification",
    "Land Encroachment Cases",
    "Property Ownership Disputes",
    "Agricultural Land Issues",
    "Real Estate Litigation",
    "Land Acquisition Matters",
    "Property Documentation",
    "Inheritance & Succession",
    "Easement & Rights of Way",
    "Property Registration Issues",
    "Land Revenue Disputes",
];

pub const BUDGET_RANGES: [&str; 6] = [
    "Under ₹5,000",
    "₹5,000 - ₹15,000",
    "₹15,000 - ₹50,000",
    "₹50,000 - ₹1,00,000",
    "Above ₹1,00,000",
    "Open to discussion",
];

/// A customer's request for legal help, optionally addressed to one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    /// `None` for anonymous submissions.
    pub customer_id: Option<UserId>,
    /// Set for direct requests; `None` means open to all professionals.
    pub provider_id: Option<ProviderId>,
    pub service_type: String,
    pub title: String,
    pub description: String,
    pub budget_range: String,
    pub urgency: Urgency,
    pub preferred_communication: CommunicationChannel,
    pub customer_phone: String,
    pub customer_email: String,
    pub documents: Vec<String>,
    pub status: RequestStatus,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Move to `next`, stamping `accepted_at` / `completed_at` as appropriate.
    ///
    /// Returns the previous status, or `Err` with it when the transition is
    /// not allowed.
    pub fn transition(&mut self, next: RequestStatus) -> Result<RequestStatus, RequestStatus> {
        let previous = self.status;
        if !previous.can_transition_to(next) {
            return Err(previous);
        }
        let now = Utc::now();
        match next {
            RequestStatus::Accepted => self.accepted_at = Some(now),
            RequestStatus::Completed => self.completed_at = Some(now),
            _ => {}
        }
        self.status = next;
        self.updated_at = now;
        Ok(previous)
    }
}

/// Lifecycle of a service request.
///
/// ```text
/// pending -> accepted -> in_progress -> completed
///    |          |  \_____________________^
///    +----------+--> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Cancelled)
                | (Accepted, InProgress)
                | (Accepted, Completed)
                | (Accepted, Cancelled)
                | (InProgress, Completed)
        )
    }

    /// Pending, accepted or in progress.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            RequestStatus::Pending | RequestStatus::Accepted | RequestStatus::InProgress
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::InProgress => write!(f, "in_progress"),
            RequestStatus::Completed => write!(f, "completed"),
            RequestStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            other => Err(format!("invalid request status: '{other}'")),
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

/// Provider-side action on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Accept,
    Start,
    Complete,
    Cancel,
}

impl RequestAction {
    pub fn target_status(self) -> RequestStatus {
        match self {
            RequestAction::Accept => RequestStatus::Accepted,
            RequestAction::Start => RequestStatus::InProgress,
            RequestAction::Complete => RequestStatus::Completed,
            RequestAction::Cancel => RequestStatus::Cancelled,
        }
    }
}

impl FromStr for RequestAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(RequestAction::Accept),
            "start" => Ok(RequestAction::Start),
            "complete" => Ok(RequestAction::Complete),
            "cancel" => Ok(RequestAction::Cancel),
            other => Err(format!("invalid request action: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Urgent];

    /// Label shown next to the urgency selector.
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Low - Within a month",
            Urgency::Medium => "Medium - Within 2 weeks",
            Urgency::High => "High - Within a week",
            Urgency::Urgent => "Urgent - ASAP",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
            Urgency::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "urgent" => Ok(Urgency::Urgent),
            other => Err(format!("invalid urgency: '{other}'")),
        }
    }
}

/// How the customer prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationChannel {
    Whatsapp,
    Phone,
    Email,
}

impl fmt::Display for CommunicationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationChannel::Whatsapp => write!(f, "whatsapp"),
            CommunicationChannel::Phone => write!(f, "phone"),
            CommunicationChannel::Email => write!(f, "email"),
        }
    }
}

impl FromStr for CommunicationChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" => Ok(CommunicationChannel::Whatsapp),
            "phone" => Ok(CommunicationChannel::Phone),
            "email" => Ok(CommunicationChannel::Email),
            other => Err(format!("invalid communication channel: '{other}'")),
        }
    }
}

impl Default for CommunicationChannel {
    fn default() -> Self {
        CommunicationChannel::Whatsapp
    }
}

/// The request form as submitted. Urgency is optional here so a missing
/// selection surfaces as a field error instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRequestForm {
    pub service_type: String,
    pub title: String,
    pub description: String,
    pub budget_range: String,
    #[serde(deserialize_with = "crate::validation::blank_as_none")]
    pub urgency: Option<Urgency>,
    pub preferred_communication: CommunicationChannel,
    pub customer_phone: String,
    pub customer_email: String,
    pub documents: Vec<String>,
    /// A blank string from the form is treated as "no provider".
    #[serde(deserialize_with = "crate::validation::blank_as_none")]
    pub provider_id: Option<ProviderId>,
}

/// A customer's request annotated for their dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRequestView {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub is_reviewed: bool,
}
