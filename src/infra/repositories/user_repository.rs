//! User repository - user rows and their team lookup.

use std::collections::HashSet;

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};

use super::entities::{team, user};
use crate::domain::{TeamMember, User};
use crate::errors::{AppError, AppResult};

/// User repository bound to an execution context.
///
/// `C` is either the pooled connection or an open transaction; the same
/// queries run against whichever the caller hands in.
pub struct UserStore<'c, C> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> UserStore<'c, C> {
    /// Create a repository over the given connection or transaction
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }

    /// Insert users, or refresh the username of users that already exist.
    ///
    /// Activity flag and team links of existing users are left untouched.
    /// Duplicate IDs within `members` keep their first occurrence.
    pub async fn upsert_many(&self, members: &[TeamMember]) -> AppResult<()> {
        let mut seen = HashSet::new();
        let rows: Vec<user::ActiveModel> = members
            .iter()
            .filter(|m| seen.insert(m.user_id.as_str()))
            .map(|m| user::ActiveModel {
                id: Set(m.user_id.clone()),
                username: Set(m.username.clone()),
                is_active: Set(m.is_active),
            })
            .collect();

        if rows.is_empty() {
            return Ok(());
        }

        user::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_column(user::Column::Username)
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Find user by ID together with the team they belong to.
    ///
    /// A user linked to several teams resolves to the earliest-created one.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id.to_string()).one(self.db).await? else {
            return Ok(None);
        };

        let team = model
            .find_related(team::Entity)
            .order_by_asc(team::Column::CreatedAt)
            .order_by_asc(team::Column::Name)
            .one(self.db)
            .await?;

        Ok(Some(User {
            user_id: model.id,
            username: model.username,
            team_name: team.map(|t| t.name),
            is_active: model.is_active,
        }))
    }

    /// Check whether a user with this ID exists
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        let found = user::Entity::find_by_id(id.to_string()).one(self.db).await?;
        Ok(found.is_some())
    }

    /// Set the activity flag. Fails with `NotFound` when no user matches.
    pub async fn set_is_active(&self, id: &str, is_active: bool) -> AppResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::IsActive, Expr::value(is_active))
            .filter(user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
