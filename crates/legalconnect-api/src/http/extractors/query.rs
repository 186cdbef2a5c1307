//! Query parameter extractors.

use serde::Deserialize;

use legalconnect_core::service::directory::DirectoryQuery;
use legalconnect_types::provider::ProviderType;

use crate::http::error::AppError;

/// `GET /providers` filters. `all` or blank means no filter.
#[derive(Debug, Deserialize, Default)]
pub struct ProviderListQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<String>,
    pub specialization: Option<String>,
}

impl ProviderListQuery {
    pub fn into_directory_query(self) -> Result<DirectoryQuery, AppError> {
        let provider_type = match self.provider_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) if t.eq_ignore_ascii_case("all") => None,
            Some(t) => Some(t.parse::<ProviderType>().map_err(AppError::BadRequest)?),
        };
        Ok(DirectoryQuery {
            search: self.search.unwrap_or_default(),
            city: self.city,
            provider_type,
            specialization: self.specialization,
        }
        .normalized())
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AdminDashboardQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuditLogQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BlogQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_means_unfiltered() {
        let query = ProviderListQuery {
            search: Some("  rao ".into()),
            city: Some("all".into()),
            provider_type: Some("All".into()),
            specialization: Some("".into()),
        }
        .into_directory_query()
        .unwrap();
        assert_eq!(query.search, "rao");
        assert!(query.city.is_none());
        assert!(query.provider_type.is_none());
        assert!(query.specialization.is_none());
    }

    #[test]
    fn test_provider_type_parsed() {
        let query = ProviderListQuery {
            provider_type: Some("advocate".into()),
            ..Default::default()
        }
        .into_directory_query()
        .unwrap();
        assert_eq!(query.provider_type, Some(ProviderType::Advocate));

        let bad = ProviderListQuery {
            provider_type: Some("wizard".into()),
            ..Default::default()
        }
        .into_directory_query();
        assert!(matches!(bad, Err(AppError::BadRequest(_))));
    }
}
