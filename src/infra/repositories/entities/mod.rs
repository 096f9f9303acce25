//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod pull_request;
pub mod pull_request_reviewer;
pub mod team;
pub mod team_member;
pub mod user;
