use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::{NewReview, ReviewMessageUpdater, UpdateError, UpdateOutcome, UpdateRequest};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::{api_error, internal_error, ApiError};
use crate::session::Caller;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub message: String,
    pub author: String,
}

pub async fn update_review_message(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(payload): Json<UpdateRequest>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let updater = ReviewMessageUpdater::new(&state.db, &state.challenges);

    match updater.update(payload, caller.as_ref()).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ UpdateError::InvalidId(_)) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
        Err(UpdateError::Storage(e)) => Err(internal_error(&e)),
    }
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let reviews = state.db.list_reviews(product).await.map_err(|e| {
        tracing::error!("Listing reviews for product {} failed: {:?}", product, e);
        internal_error(&e)
    })?;

    Ok(Json(json!({ "status": "success", "data": reviews })))
}

pub async fn create_review(
    State(state): State<AppState>,
    Path(product): Path<i64>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let review = state
        .db
        .create_review(NewReview {
            product,
            author: payload.author,
            message: payload.message,
        })
        .await
        .map_err(|e| {
            tracing::error!("Creating review for product {} failed: {:?}", product, e);
            internal_error(&e)
        })?;

    tracing::info!("Review {} created for product {}", review.id, product);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "data": review })),
    ))
}
