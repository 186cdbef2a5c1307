//! Public provider directory: listing, filtering and profile pages.

use serde::{Deserialize, Serialize};

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::id::ProviderId;
use legalconnect_types::provider::{Provider, ProviderType};
use legalconnect_types::request::ServiceRequest;
use legalconnect_types::review::Review;

use crate::repository::provider::{ProviderFilter, ProviderRepository};
use crate::repository::review::{ReviewFilter, ReviewRepository};

/// Number of providers shown on the home page.
pub const FEATURED_LIMIT: i64 = 3;

/// Directory filters. `None` means "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryQuery {
    pub search: String,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<ProviderType>,
    pub specialization: Option<String>,
}

impl DirectoryQuery {
    /// Treat blank and `"all"` selections as no filter.
    pub fn normalized(mut self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("all"))
        }
        self.city = keep(self.city);
        self.specialization = keep(self.specialization);
        self.search = self.search.trim().to_string();
        self
    }
}

/// Distinct filter values present in a provider list, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub cities: Vec<String>,
    pub provider_types: Vec<ProviderType>,
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    pub provider: Provider,
    pub reviews: Vec<Review>,
    pub whatsapp_url: Option<String>,
}

pub struct DirectoryService<P: ProviderRepository, R: ReviewRepository> {
    providers: P,
    reviews: R,
}

impl<P: ProviderRepository, R: ReviewRepository> DirectoryService<P, R> {
    pub fn new(providers: P, reviews: R) -> Self {
        Self { providers, reviews }
    }

    /// Verified providers, highest rating first.
    pub async fn list_verified(&self) -> Result<Vec<Provider>, MarketplaceError> {
        Ok(self
            .providers
            .list(Some(ProviderFilter::verified_by_rating()))
            .await?)
    }

    pub async fn featured(&self, limit: i64) -> Result<Vec<Provider>, MarketplaceError> {
        let filter = ProviderFilter {
            limit: Some(limit),
            ..ProviderFilter::verified_by_rating()
        };
        Ok(self.providers.list(Some(filter)).await?)
    }

    /// A provider with its reviews, newest first.
    pub async fn profile(&self, id: &ProviderId) -> Result<ProviderProfile, MarketplaceError> {
        let provider = self
            .providers
            .get_by_id(id)
            .await?
            .ok_or(MarketplaceError::NotFound("provider"))?;
        let reviews = self
            .reviews
            .list(Some(ReviewFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            }))
            .await?;
        let whatsapp_url = provider_contact_url(&provider);
        Ok(ProviderProfile {
            provider,
            reviews,
            whatsapp_url,
        })
    }
}

/// Apply directory filters. Search matches business name, city or any
/// specialization, case-insensitively; city and specialization are exact.
pub fn filter_providers(providers: &[Provider], query: &DirectoryQuery) -> Vec<Provider> {
    let needle = query.search.to_lowercase();
    providers
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.business_name.to_lowercase().contains(&needle)
                || p.city.to_lowercase().contains(&needle)
                || p
                    .specializations
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
        })
        .filter(|p| query.city.as_ref().is_none_or(|c| &p.city == c))
        .filter(|p| query.provider_type.is_none_or(|t| p.provider_type == t))
        .filter(|p| {
            query
                .specialization
                .as_ref()
                .is_none_or(|s| p.specializations.contains(s))
        })
        .cloned()
        .collect()
}

pub fn facets(providers: &[Provider]) -> Facets {
    let mut facets = Facets::default();
    for provider in providers {
        if !provider.city.is_empty() && !facets.cities.contains(&provider.city) {
            facets.cities.push(provider.city.clone());
        }
        if !facets.provider_types.contains(&provider.provider_type) {
            facets.provider_types.push(provider.provider_type);
        }
        for spec in &provider.specializations {
            if !spec.is_empty() && !facets.specializations.contains(spec) {
                facets.specializations.push(spec.clone());
            }
        }
    }
    facets
}

/// Admin dashboard search over business name, city and provider type.
pub fn admin_search(providers: &[Provider], term: &str) -> Vec<Provider> {
    let needle = term.trim().to_lowercase();
    providers
        .iter()
        .filter(|p| {
            p.business_name.to_lowercase().contains(&needle)
                || p.city.to_lowercase().contains(&needle)
                || p.provider_type.to_string().contains(&needle)
        })
        .cloned()
        .collect()
}

/// `https://wa.me/91{digits}?text={message}` or `None` when `number` has no digits.
pub fn whatsapp_url(number: &str, message: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    url::Url::parse_with_params(&format!("https://wa.me/91{digits}"), &[("text", message)])
        .ok()
        .map(String::from)
}

/// Customer-to-provider link. Uses the WhatsApp number, falling back to the phone number.
pub fn provider_contact_url(provider: &Provider) -> Option<String> {
    let number = if provider.whatsapp_number.trim().is_empty() {
        &provider.phone_number
    } else {
        &provider.whatsapp_number
    };
    whatsapp_url(
        number,
        &format!(
            "Hello {}, I found your profile on LegalConnect and would like to inquire about your legal services.",
            provider.business_name
        ),
    )
}

/// Provider-to-customer link for a request.
pub fn customer_contact_url(request: &ServiceRequest) -> Option<String> {
    whatsapp_url(
        &request.customer_phone,
        &format!(
            "Hello! I'm responding to your legal service request: {}",
            request.title
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, provider_for, provider_user};
    use legalconnect_types::provider::VerificationStatus;

    fn sample() -> Vec<Provider> {
        let mut a = provider_for(&provider_user("a@x.in"), "Rao Legal", "Bengaluru");
        a.specializations = vec!["Property Law".into(), "Civil Law".into()];
        let mut b = provider_for(&provider_user("b@x.in"), "Mehta Associates", "Pune");
        b.provider_type = ProviderType::Broker;
        b.specializations = vec!["Tax Law".into()];
        let mut c = provider_for(&provider_user("c@x.in"), "Iyer & Co", "Bengaluru");
        c.provider_type = ProviderType::Paralegal;
        c.specializations = vec!["Property Law".into()];
        vec![a, b, c]
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let providers = sample();
        assert_eq!(filter_providers(&providers, &DirectoryQuery::default()).len(), 3);
    }

    #[test]
    fn test_search_matches_name_city_and_specialization() {
        let providers = sample();
        let by = |s: &str| {
            filter_providers(
                &providers,
                &DirectoryQuery {
                    search: s.into(),
                    ..Default::default()
                },
            )
            .into_iter()
            .map(|p| p.business_name)
            .collect::<Vec<_>>()
        };
        assert_eq!(by("mehta"), vec!["Mehta Associates"]);
        assert_eq!(by("PUNE"), vec!["Mehta Associates"]);
        assert_eq!(by("property"), vec!["Rao Legal", "Iyer & Co"]);
        assert!(by("criminal").is_empty());
    }

    #[test]
    fn test_exact_filters_combine() {
        let providers = sample();
        let query = DirectoryQuery {
            city: Some("Bengaluru".into()),
            specialization: Some("Property Law".into()),
            provider_type: Some(ProviderType::Paralegal),
            ..Default::default()
        };
        let found = filter_providers(&providers, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].business_name, "Iyer & Co");

        let query = DirectoryQuery {
            city: Some("bengaluru".into()),
            ..Default::default()
        };
        assert!(filter_providers(&providers, &query).is_empty());
    }

    #[test]
    fn test_normalized_treats_all_as_none() {
        let query = DirectoryQuery {
            search: "  rao ".into(),
            city: Some("all".into()),
            specialization: Some(" ".into()),
            provider_type: None,
        }
        .normalized();
        assert_eq!(query.search, "rao");
        assert!(query.city.is_none());
        assert!(query.specialization.is_none());
    }

    #[test]
    fn test_facets_first_seen_order() {
        let facets = facets(&sample());
        assert_eq!(facets.cities, vec!["Bengaluru", "Pune"]);
        assert_eq!(
            facets.provider_types,
            vec![ProviderType::Advocate, ProviderType::Broker, ProviderType::Paralegal]
        );
        assert_eq!(facets.specializations, vec!["Property Law", "Civil Law", "Tax Law"]);
    }

    #[test]
    fn test_admin_search_includes_type() {
        let providers = sample();
        assert_eq!(admin_search(&providers, "broker").len(), 1);
        assert_eq!(admin_search(&providers, "bengaluru").len(), 2);
        assert_eq!(admin_search(&providers, "").len(), 3);
    }

    #[test]
    fn test_whatsapp_url() {
        let url = whatsapp_url("98450-12345", "Hello there").unwrap();
        assert!(url.starts_with("https://wa.me/919845012345?text="));
        assert!(url.contains("Hello"));
        assert!(whatsapp_url("", "x").is_none());
    }

    #[test]
    fn test_provider_contact_prefers_whatsapp_number() {
        let mut provider = sample().remove(0);
        provider.phone_number = "1111111111".into();
        provider.whatsapp_number = "2222222222".into();
        assert!(provider_contact_url(&provider).unwrap().contains("/912222222222?"));
        provider.whatsapp_number.clear();
        assert!(provider_contact_url(&provider).unwrap().contains("/911111111111?"));
    }

    #[test]
    fn test_provider_contact_message() {
        let provider = sample().remove(0);
        let link = url::Url::parse(&provider_contact_url(&provider).unwrap()).unwrap();
        let (_, text) = link.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert_eq!(
            text,
            format!(
                "Hello {}, I found your profile on LegalConnect and would like to inquire about your legal services.",
                provider.business_name
            )
        );
    }

    #[tokio::test]
    async fn test_list_verified_sorted_by_rating() {
        let store = MemoryStore::new();
        let mut providers = sample();
        providers[0].rating = 3.5;
        providers[1].rating = 4.8;
        providers[2].verification_status = VerificationStatus::Pending;
        providers[2].rating = 5.0;
        for p in providers {
            store.insert_provider(p);
        }
        let directory = DirectoryService::new(store.clone(), store.clone());

        let listed = directory.list_verified().await.unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.business_name.as_str()).collect();
        assert_eq!(names, vec!["Mehta Associates", "Rao Legal"]);

        let featured = directory.featured(1).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].business_name, "Mehta Associates");
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let store = MemoryStore::new();
        let directory = DirectoryService::new(store.clone(), store.clone());
        assert!(matches!(
            directory.profile(&ProviderId::new()).await,
            Err(MarketplaceError::NotFound("provider"))
        ));
    }
}
