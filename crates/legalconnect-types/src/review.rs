use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ProviderId, ReviewId, ServiceRequestId, UserId};
use crate::validation::FieldErrors;

/// A customer's rating of a provider for one completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub customer_id: UserId,
    pub provider_id: ProviderId,
    pub service_request_id: ServiceRequestId,
    /// Overall rating, 1..=5.
    pub rating: u8,
    pub comment: String,
    /// Sub-ratings are 0..=5 where 0 means "not rated".
    pub service_quality: u8,
    pub communication: u8,
    pub timeliness: u8,
    pub created_at: DateTime<Utc>,
}

/// Review dialog state before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    pub service_quality: u8,
    pub communication: u8,
    pub timeliness: u8,
}

impl ReviewDraft {
    /// Submission stays disabled until an overall rating is chosen.
    pub fn can_submit(&self) -> bool {
        self.rating > 0
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !(1..=5).contains(&self.rating) {
            errors.add("rating", "Rating must be between 1 and 5");
        }
        for (field, value) in [
            ("service_quality", self.service_quality),
            ("communication", self.communication),
            ("timeliness", self.timeliness),
        ] {
            if value > 5 {
                errors.add(field, "Rating must be between 0 and 5");
            }
        }
        errors.into_result()
    }
}

/// Submit-review request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub service_request_id: ServiceRequestId,
    #[serde(flatten)]
    pub draft: ReviewDraft,
}

/// Mean of `ratings` rounded to one decimal, 0.0 when empty.
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit_requires_rating() {
        let mut draft = ReviewDraft::default();
        assert!(!draft.can_submit());
        draft.rating = 4;
        assert!(draft.can_submit());
    }

    #[test]
    fn test_validate_bounds() {
        let draft = ReviewDraft {
            rating: 6,
            timeliness: 9,
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("rating"));
        assert!(errors.contains("timeliness"));
        assert!(!errors.contains("communication"));

        let draft = ReviewDraft {
            rating: 5,
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[4, 5, 5]), 4.7);
        assert_eq!(average_rating(&[1, 2]), 1.5);
    }

    #[test]
    fn test_new_review_flattens_draft() {
        let id = ServiceRequestId::new();
        let json = format!(r#"{{"service_request_id":"{id}","rating":4,"comment":"Helpful"}}"#);
        let review: NewReview = serde_json::from_str(&json).unwrap();
        assert_eq!(review.draft.rating, 4);
        assert_eq!(review.draft.service_quality, 0);
    }
}
