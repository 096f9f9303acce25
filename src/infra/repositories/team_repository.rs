//! Team repository - teams and their membership links.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::conflict_as;
use super::entities::{team, team_member, user};
use crate::domain::{Team, TeamMember};
use crate::errors::{AppResult, Resource};

/// Team repository bound to an execution context.
pub struct TeamStore<'c, C> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> TeamStore<'c, C> {
    /// Create a repository over the given connection or transaction
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }

    /// Check whether a team with this exact name exists
    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let found = team::Entity::find()
            .filter(team::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(found.is_some())
    }

    /// Create a team row and return its generated ID
    pub async fn create(&self, name: &str) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let row = team::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        team::Entity::insert(row)
            .exec_without_returning(self.db)
            .await
            .map_err(conflict_as(Resource::Team))?;

        Ok(id)
    }

    /// Link users to a team, skipping links that already exist
    pub async fn add_members(&self, team_id: Uuid, members: &[TeamMember]) -> AppResult<()> {
        if members.is_empty() {
            return Ok(());
        }

        let links = members.iter().map(|m| team_member::ActiveModel {
            team_id: Set(team_id),
            user_id: Set(m.user_id.clone()),
        });

        team_member::Entity::insert_many(links)
            .on_conflict(
                OnConflict::columns([team_member::Column::TeamId, team_member::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Find a team by name with its current members, ordered by user ID
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Team>> {
        let Some(model) = team::Entity::find()
            .filter(team::Column::Name.eq(name))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let members = model
            .find_related(user::Entity)
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some(Team {
            team_name: model.name,
            members: members.into_iter().map(TeamMember::from).collect(),
        }))
    }
}
