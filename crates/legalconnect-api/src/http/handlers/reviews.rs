//! Review submission.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use legalconnect_types::review::{NewReview, Review};

use crate::http::extractors::auth::CurrentUser;
use crate::http::response::{ApiResult, ok};
use crate::state::AppState;

/// POST /api/v1/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewReview>,
) -> ApiResult<Review> {
    let start = Instant::now();
    let review = state.review_service.submit_review(&user, body).await?;
    Ok(ok(review, start))
}
