//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{
    PullRequestManager, PullRequestService, TeamManager, TeamService, UserManager, UserService,
};
use crate::config::Config;
use crate::domain::ReviewerPicker;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get team service
    fn teams(&self) -> Arc<dyn TeamService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get pull request service
    fn pull_requests(&self) -> Arc<dyn PullRequestService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    team_service: Arc<dyn TeamService>,
    user_service: Arc<dyn UserService>,
    pull_request_service: Arc<dyn PullRequestService>,
}

impl Services {
    /// Create service container from database connection and config.
    ///
    /// The reviewer picker is seeded from `config.reviewer_seed` when set,
    /// otherwise from operating system entropy.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let picker = match config.reviewer_seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded reviewer picker");
                ReviewerPicker::seeded(seed)
            }
            None => ReviewerPicker::from_entropy(),
        };

        Self::with_picker(db, picker)
    }

    /// Create service container with an explicit reviewer picker
    pub fn with_picker(db: sea_orm::DatabaseConnection, picker: ReviewerPicker) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let picker = Arc::new(picker);

        Self {
            team_service: Arc::new(TeamManager::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            pull_request_service: Arc::new(PullRequestManager::new(uow, picker)),
        }
    }
}

impl ServiceContainer for Services {
    fn teams(&self) -> Arc<dyn TeamService> {
        self.team_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn pull_requests(&self) -> Arc<dyn PullRequestService> {
        self.pull_request_service.clone()
    }
}
