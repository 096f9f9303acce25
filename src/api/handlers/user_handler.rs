//! User handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{User, UserReviews};
use crate::errors::AppResult;

/// Activity flag update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetIsActiveRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    #[schema(example = "u2")]
    pub user_id: String,
    #[schema(example = false)]
    pub is_active: bool,
}

/// Query identifying a user
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    #[param(example = "u2")]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/setIsActive", post(set_is_active))
        .route("/getReview", get(get_review))
}

/// Set a user's activity flag
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    tag = "Users",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn set_is_active(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SetIsActiveRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .user_service
        .set_is_active(payload.user_id, payload.is_active)
        .await?;

    Ok(Json(user))
}

/// List pull requests the user is assigned to review
#[utoipa::path(
    get,
    path = "/users/getReview",
    tag = "Users",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Assigned pull requests", body = UserReviews),
        (status = 400, description = "Missing user_id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserIdQuery>,
) -> AppResult<Json<UserReviews>> {
    let reviews = state
        .pull_request_service
        .get_user_reviews(query.user_id)
        .await?;

    Ok(Json(reviews))
}
