use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::{ProviderId, UserId};

/// States and union territories offered in the signup and profile forms.
pub const INDIAN_STATES: [&str; 31] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
];

/// Specializations a provider can pick from.
pub const LEGAL_SPECIALIZATIONS: [&str; 16] = [
    "Civil Law",
    "Criminal Law",
    "Corporate Law",
    "Family Law",
    "Property Law",
    "Labour Law",
    "Tax Law",
    "Immigration Law",
    "Intellectual Property",
    "Banking Law",
    "Insurance Law",
    "Consumer Law",
    "Environmental Law",
    "Human Rights",
    "Cyber Law",
    "Constitutional Law",
];

/// A legal-service professional listed in the marketplace.
///
/// One-to-one with a [`crate::user::User`] whose `user_type` is provider.
/// Only verified providers appear in the public directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub user_id: UserId,
    pub provider_type: ProviderType,
    pub business_name: String,
    /// Bar council / license number. Required for advocates only.
    pub license_number: String,
    pub bio: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub office_address: String,
    pub city: String,
    pub state: String,
    pub experience_years: u32,
    pub qualifications: Vec<String>,
    /// Set semantics: no duplicates.
    pub specializations: Vec<String>,
    /// Ordered as the provider arranged them.
    pub services_offered: Vec<ServiceOffering>,
    pub profile_photo: Option<String>,
    pub verification_documents: Vec<String>,
    pub verification_status: VerificationStatus,
    pub verification_reason: Option<String>,
    pub is_available: bool,
    /// Mean review rating, 0.0 while unrated.
    pub rating: f64,
    pub total_reviews: u32,
    pub completed_cases: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced service listed on a provider's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub service_name: String,
    #[serde(default)]
    pub description: String,
    pub price_range: String,
}

/// Kind of legal professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Advocate,
    Broker,
    Paralegal,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Advocate => write!(f, "advocate"),
            ProviderType::Broker => write!(f, "broker"),
            ProviderType::Paralegal => write!(f, "paralegal"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "advocate" => Ok(ProviderType::Advocate),
            "broker" => Ok(ProviderType::Broker),
            "paralegal" => Ok(ProviderType::Paralegal),
            other => Err(format!("invalid provider type: '{other}'")),
        }
    }
}

/// Admin-controlled trust flag.
///
/// - Pending: awaiting review, hidden from the directory
/// - Verified: listed and able to receive requests
/// - Rejected: hidden; the reason is stored alongside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// Only `pending -> verified` and `pending -> rejected` exist.
    pub fn can_transition_to(self, next: VerificationStatus) -> bool {
        matches!(
            (self, next),
            (VerificationStatus::Pending, VerificationStatus::Verified)
                | (VerificationStatus::Pending, VerificationStatus::Rejected)
        )
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("invalid verification status: '{other}'")),
        }
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        VerificationStatus::Pending
    }
}

/// Provider-editable profile fields. `None` leaves a field untouched.
///
/// Provider type, verification state, rating, counters and ownership are not
/// part of this request and can never be changed through it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProviderProfile {
    pub business_name: Option<String>,
    pub license_number: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub office_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub experience_years: Option<u32>,
    pub qualifications: Option<Vec<String>>,
    pub specializations: Option<Vec<String>>,
    pub profile_photo: Option<String>,
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_transitions() {
        use VerificationStatus::*;
        assert!(Pending.can_transition_to(Verified));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Verified.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Verified));
        assert!(!Verified.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_provider_type_parse() {
        assert_eq!("Advocate".parse::<ProviderType>().unwrap(), ProviderType::Advocate);
        assert!("notary".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_offering_description_defaults_to_empty() {
        let offering: ServiceOffering =
            serde_json::from_str(r#"{"service_name":"Title check","price_range":"₹5,000"}"#)
                .unwrap();
        assert_eq!(offering.description, "");
    }

    #[test]
    fn test_reference_lists() {
        assert!(INDIAN_STATES.contains(&"Karnataka"));
        assert!(LEGAL_SPECIALIZATIONS.contains(&"Property Law"));
    }
}
