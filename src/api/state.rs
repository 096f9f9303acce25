//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{PullRequestService, ServiceContainer, Services, TeamService, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Team service
    pub team_service: Arc<dyn TeamService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Pull request service
    pub pull_request_service: Arc<dyn PullRequestService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            team_service: container.teams(),
            user_service: container.users(),
            pull_request_service: container.pull_requests(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        team_service: Arc<dyn TeamService>,
        user_service: Arc<dyn UserService>,
        pull_request_service: Arc<dyn PullRequestService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            team_service,
            user_service,
            pull_request_service,
            database,
        }
    }
}
