//! User domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Externally supplied identifier
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "Alice")]
    pub username: String,
    /// Team the user currently belongs to
    #[schema(example = "payments")]
    pub team_name: Option<String>,
    #[schema(example = true)]
    pub is_active: bool,
}
