//! Team service - Team creation and roster lookup.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Team;
use crate::errors::{AppError, AppResult, OptionExt, Resource};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Team service trait for dependency injection.
#[async_trait]
pub trait TeamService: Send + Sync {
    /// Create a team and upsert its members. Returns the submitted team.
    async fn create_team(&self, team: Team) -> AppResult<Team>;

    /// Get a team with its current members
    async fn get_team(&self, name: &str) -> AppResult<Team>;
}

/// Concrete implementation of TeamService using Unit of Work.
pub struct TeamManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TeamManager<U> {
    /// Create new team service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

async fn create_team_in(ctx: TransactionContext<'_>, team: Team) -> AppResult<Team> {
    if ctx.teams().exists_by_name(&team.team_name).await? {
        return Err(AppError::AlreadyExists(Resource::Team));
    }

    let team_id = ctx.teams().create(&team.team_name).await?;
    ctx.users().upsert_many(&team.members).await?;
    ctx.teams().add_members(team_id, &team.members).await?;

    Ok(team)
}

#[async_trait]
impl<U: UnitOfWork> TeamService for TeamManager<U> {
    async fn create_team(&self, team: Team) -> AppResult<Team> {
        let team = with_transaction!(self.uow, |ctx| create_team_in(ctx, team).await)?;

        tracing::info!(
            team = %team.team_name,
            members = team.members.len(),
            "Team created"
        );

        Ok(team)
    }

    async fn get_team(&self, name: &str) -> AppResult<Team> {
        self.uow
            .teams()
            .find_by_name(name.trim())
            .await?
            .ok_or_not_found()
    }
}
