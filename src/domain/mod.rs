//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: Entities, Value Objects, Domain Services.

pub mod pull_request;
pub mod reviewer;
pub mod team;
pub mod user;

pub use pull_request::{PullRequest, PullRequestShort, PullRequestStatus, UserReviews};
pub use reviewer::{select_reviewers, ReviewerPicker};
pub use team::{Team, TeamMember};
pub use user::User;
