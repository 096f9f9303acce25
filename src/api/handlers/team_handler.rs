//! Team handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Team, TeamMember};
use crate::errors::AppResult;

/// Team member entry in a team creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TeamMemberRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    #[schema(example = "u1")]
    pub user_id: String,
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "Alice")]
    pub username: String,
    #[schema(example = true)]
    pub is_active: bool,
}

/// Team creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddTeamRequest {
    #[validate(length(min = 1, message = "team_name is required"))]
    #[schema(example = "payments")]
    pub team_name: String,
    #[validate(nested)]
    pub members: Vec<TeamMemberRequest>,
}

impl From<AddTeamRequest> for Team {
    fn from(req: AddTeamRequest) -> Self {
        Team {
            team_name: req.team_name,
            members: req
                .members
                .into_iter()
                .map(|m| TeamMember::new(m.user_id, m.username, m.is_active))
                .collect(),
        }
    }
}

/// Team lookup query
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetTeamQuery {
    /// Team name; surrounding whitespace is ignored
    #[serde(rename = "TeamName")]
    #[param(example = "payments")]
    #[validate(length(min = 1, message = "TeamName is required"))]
    pub team_name: String,
}

/// Create team routes
pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_team))
        .route("/get", get(get_team))
}

/// Create a team and upsert its members
#[utoipa::path(
    post,
    path = "/team/add",
    tag = "Teams",
    request_body = AddTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid payload or team already exists", body = ErrorResponse)
    )
)]
pub async fn add_team(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddTeamRequest>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state.team_service.create_team(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Get a team with its members
#[utoipa::path(
    get,
    path = "/team/get",
    tag = "Teams",
    params(GetTeamQuery),
    responses(
        (status = 200, description = "Team found", body = Team),
        (status = 400, description = "Missing team name", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse)
    )
)]
pub async fn get_team(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetTeamQuery>,
) -> AppResult<Json<Team>> {
    let team = state.team_service.get_team(&query.team_name).await?;
    Ok(Json(team))
}
