//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{pull_request_handler, team_handler, user_handler};
use crate::domain::{
    PullRequest, PullRequestShort, PullRequestStatus, Team, TeamMember, User, UserReviews,
};
use crate::errors::ErrorResponse;

/// OpenAPI documentation for the reviewer assignment service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR Reviewer Assignment Service",
        version = "0.1.0",
        description = "Assigns pull request reviewers from the author's team"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Team endpoints
        team_handler::add_team,
        team_handler::get_team,
        // User endpoints
        user_handler::set_is_active,
        user_handler::get_review,
        // Pull request endpoints
        pull_request_handler::create_pull_request,
        pull_request_handler::merge_pull_request,
        pull_request_handler::reassign_pull_request,
    ),
    components(
        schemas(
            // Domain types
            Team,
            TeamMember,
            User,
            PullRequest,
            PullRequestShort,
            PullRequestStatus,
            UserReviews,
            ErrorResponse,
            // Request types
            team_handler::AddTeamRequest,
            team_handler::TeamMemberRequest,
            user_handler::SetIsActiveRequest,
            pull_request_handler::CreatePullRequestRequest,
            pull_request_handler::MergePullRequestRequest,
            pull_request_handler::ReassignRequest,
        )
    ),
    tags(
        (name = "Teams", description = "Team creation and lookup"),
        (name = "Users", description = "User activity and review assignments"),
        (name = "Pull Requests", description = "Pull request lifecycle and reviewer assignment")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/team/add",
            "/team/get",
            "/users/setIsActive",
            "/users/getReview",
            "/pullRequest/create",
            "/pullRequest/merge",
            "/pullRequest/reassign",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }
}
