//! Static option lists used by the web forms.

use std::time::Instant;

use serde::Serialize;

use legalconnect_types::blog::CATEGORIES;
use legalconnect_types::provider::{INDIAN_STATES, LEGAL_SPECIALIZATIONS, ProviderType};
use legalconnect_types::request::{BUDGET_RANGES, SERVICE_TYPES, Urgency};

use crate::http::response::{ApiResult, ok};

#[derive(Debug, Serialize)]
pub struct UrgencyOption {
    pub value: Urgency,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReferenceData {
    pub states: Vec<&'static str>,
    pub specializations: Vec<&'static str>,
    pub provider_types: Vec<ProviderType>,
    pub service_types: Vec<&'static str>,
    pub budget_ranges: Vec<&'static str>,
    pub urgency: Vec<UrgencyOption>,
    pub blog_categories: Vec<&'static str>,
}

/// GET /api/v1/reference
pub async fn reference() -> ApiResult<ReferenceData> {
    let start = Instant::now();
    let data = ReferenceData {
        states: INDIAN_STATES.to_vec(),
        specializations: LEGAL_SPECIALIZATIONS.to_vec(),
        provider_types: vec![
            ProviderType::Advocate,
            ProviderType::Broker,
            ProviderType::Paralegal,
        ],
        service_types: SERVICE_TYPES.to_vec(),
        budget_ranges: BUDGET_RANGES.to_vec(),
        urgency: Urgency::ALL
            .iter()
            .map(|&value| UrgencyOption {
                value,
                label: value.label(),
            })
            .collect(),
        blog_categories: CATEGORIES.to_vec(),
    };
    Ok(ok(data, start))
}
