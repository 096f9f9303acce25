//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod container;
mod pull_request_service;
mod team_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use pull_request_service::{PullRequestManager, PullRequestService};
pub use team_service::{TeamManager, TeamService};
pub use user_service::{UserManager, UserService};
