//! Pull request aggregate and its projections.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TeamMember;
use crate::config::{STATUS_MERGED, STATUS_OPENED};

/// Pull request lifecycle: OPENED -> MERGED (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    Opened,
    Merged,
}

impl PullRequestStatus {
    pub fn is_merged(&self) -> bool {
        matches!(self, PullRequestStatus::Merged)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Opened => STATUS_OPENED,
            PullRequestStatus::Merged => STATUS_MERGED,
        }
    }
}

impl From<&str> for PullRequestStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_MERGED => PullRequestStatus::Merged,
            _ => PullRequestStatus::Opened,
        }
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pull request with its assigned reviewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    #[schema(example = "pr-1001")]
    pub id: String,
    #[serde(rename = "pull_request_name")]
    #[schema(example = "Add search")]
    pub name: String,
    #[schema(example = "u1")]
    pub author_id: String,
    pub status: PullRequestStatus,
    #[serde(rename = "assigned_reviewers")]
    pub reviewers: Vec<TeamMember>,
}

impl PullRequest {
    /// IDs of the currently assigned reviewers
    pub fn reviewer_ids(&self) -> Vec<String> {
        self.reviewers.iter().map(|r| r.user_id.clone()).collect()
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r.user_id == user_id)
    }
}

/// Short pull request projection used in review listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PullRequestShort {
    #[serde(rename = "pull_request_id")]
    #[schema(example = "pr-1001")]
    pub id: String,
    #[serde(rename = "pull_request_name")]
    #[schema(example = "Add search")]
    pub name: String,
    #[schema(example = "u1")]
    pub author_id: String,
    pub status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShort {
    fn from(pr: PullRequest) -> Self {
        Self {
            id: pr.id,
            name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

/// Pull requests a user is currently assigned to review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserReviews {
    #[schema(example = "u2")]
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}
