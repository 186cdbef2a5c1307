//! Customer reviews of completed requests.

use chrono::Utc;

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::id::ReviewId;
use legalconnect_types::request::RequestStatus;
use legalconnect_types::review::{NewReview, Review, average_rating};
use legalconnect_types::user::User;

use crate::repository::provider::ProviderRepository;
use crate::repository::review::{ReviewFilter, ReviewRepository};
use crate::repository::service_request::ServiceRequestRepository;

pub struct ReviewService<P, S, R>
where
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
{
    providers: P,
    requests: S,
    reviews: R,
}

impl<P, S, R> ReviewService<P, S, R>
where
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
{
    pub fn new(providers: P, requests: S, reviews: R) -> Self {
        Self {
            providers,
            requests,
            reviews,
        }
    }

    /// Record a review and refresh the provider's rating and review count.
    ///
    /// Only the customer who raised a completed request handled by a
    /// provider may review it, once.
    pub async fn submit_review(&self, user: &User, input: NewReview) -> Result<Review, MarketplaceError> {
        input.draft.validate()?;

        let request = self
            .requests
            .get_by_id(&input.service_request_id)
            .await?
            .ok_or(MarketplaceError::NotFound("service request"))?;
        if request.customer_id != Some(user.id) {
            return Err(MarketplaceError::Forbidden(
                "you can only review your own requests".into(),
            ));
        }
        let provider_id = request.provider_id.ok_or_else(|| {
            MarketplaceError::invalid(
                "service_request_id",
                "Only requests handled by a provider can be reviewed",
            )
        })?;
        if request.status != RequestStatus::Completed {
            return Err(MarketplaceError::invalid(
                "service_request_id",
                "Only completed requests can be reviewed",
            ));
        }

        let existing = self
            .reviews
            .list(Some(ReviewFilter {
                customer_id: Some(user.id),
                service_request_id: Some(request.id),
                ..Default::default()
            }))
            .await?;
        if !existing.is_empty() {
            return Err(MarketplaceError::Conflict(
                "you have already reviewed this request".into(),
            ));
        }

        let draft = input.draft;
        let review = self
            .reviews
            .create(&Review {
                id: ReviewId::new(),
                customer_id: user.id,
                provider_id,
                service_request_id: request.id,
                rating: draft.rating,
                comment: draft.comment.trim().to_string(),
                service_quality: draft.service_quality,
                communication: draft.communication,
                timeliness: draft.timeliness,
                created_at: Utc::now(),
            })
            .await?;

        self.refresh_rating(&review).await?;
        tracing::info!(review_id = %review.id, provider_id = %provider_id, rating = review.rating, "review submitted");
        Ok(review)
    }

    async fn refresh_rating(&self, review: &Review) -> Result<(), MarketplaceError> {
        let Some(mut provider) = self.providers.get_by_id(&review.provider_id).await? else {
            tracing::warn!(provider_id = %review.provider_id, "reviewed provider no longer exists");
            return Ok(());
        };
        let ratings: Vec<u8> = self
            .reviews
            .list(Some(ReviewFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            }))
            .await?
            .iter()
            .map(|r| r.rating)
            .collect();
        provider.rating = average_rating(&ratings);
        provider.total_reviews = ratings.len() as u32;
        provider.updated_at = Utc::now();
        self.providers.update(&provider).await?;
        Ok(())
    }
}
