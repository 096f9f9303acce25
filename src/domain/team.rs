//! Team aggregate and its member value object.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Team member as seen through a team roster or a reviewer list.
///
/// `is_active` reflects the user's current global status, not a per-team flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "Alice")]
    pub username: String,
    #[schema(example = true)]
    pub is_active: bool,
}

impl TeamMember {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }
    }
}

/// Team with its member roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    #[schema(example = "payments")]
    pub team_name: String,
    pub members: Vec<TeamMember>,
}
