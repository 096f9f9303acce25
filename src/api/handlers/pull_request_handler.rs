//! Pull request handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::PullRequest;
use crate::errors::AppResult;

/// Pull request creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[validate(length(min = 1, message = "pull_request_name is required"))]
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[validate(length(min = 1, message = "author_id is required"))]
    #[schema(example = "u1")]
    pub author_id: String,
}

/// Merge request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MergePullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
}

/// Reviewer reassignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReassignRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[validate(length(min = 1, message = "old_user_id is required"))]
    #[schema(example = "u2")]
    pub old_user_id: String,
}

/// Create pull request routes
pub fn pull_request_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_pull_request))
        .route("/merge", post(merge_pull_request))
        .route("/reassign", post(reassign_pull_request))
}

/// Open a pull request and assign reviewers
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    tag = "Pull Requests",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = PullRequest),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Author or team not found", body = ErrorResponse),
        (status = 409, description = "Pull request exists or no reviewer available", body = ErrorResponse)
    )
)]
pub async fn create_pull_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePullRequestRequest>,
) -> AppResult<(StatusCode, Json<PullRequest>)> {
    let pr = state
        .pull_request_service
        .create_pull_request(
            payload.pull_request_id,
            payload.pull_request_name,
            payload.author_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(pr)))
}

/// Mark a pull request as merged
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    tag = "Pull Requests",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Pull request merged", body = PullRequest),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Pull request not found", body = ErrorResponse)
    )
)]
pub async fn merge_pull_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MergePullRequestRequest>,
) -> AppResult<Json<PullRequest>> {
    let pr = state
        .pull_request_service
        .merge_pull_request(payload.pull_request_id)
        .await?;

    Ok(Json(pr))
}

/// Replace a reviewer with another member of the author's team
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    tag = "Pull Requests",
    request_body = ReassignRequest,
    responses(
        (status = 200, description = "Reviewer reassigned", body = PullRequest),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Pull request or user not found", body = ErrorResponse),
        (status = 409, description = "Merged, not assigned or no candidate", body = ErrorResponse)
    )
)]
pub async fn reassign_pull_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReassignRequest>,
) -> AppResult<Json<PullRequest>> {
    let pr = state
        .pull_request_service
        .reassign_pull_request(payload.pull_request_id, payload.old_user_id)
        .await?;

    Ok(Json(pr))
}
