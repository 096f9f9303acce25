//! Pull request repository - pull requests and reviewer assignments.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use super::conflict_as;
use super::entities::{pull_request, pull_request_reviewer, user};
use crate::config::{STATUS_MERGED, STATUS_OPENED};
use crate::domain::{PullRequest, PullRequestShort, PullRequestStatus, TeamMember};
use crate::errors::{AppError, AppResult, Resource};

/// Pull request repository bound to an execution context.
pub struct PullRequestStore<'c, C> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> PullRequestStore<'c, C> {
    /// Create a repository over the given connection or transaction
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }

    /// Check whether a pull request with this ID exists
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        let found = pull_request::Entity::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(found.is_some())
    }

    /// Insert a new pull request in OPENED state
    pub async fn create(&self, id: &str, name: &str, author_id: &str) -> AppResult<()> {
        let row = pull_request::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            author_id: Set(author_id.to_string()),
            status: Set(STATUS_OPENED.to_string()),
        };

        pull_request::Entity::insert(row)
            .exec_without_returning(self.db)
            .await
            .map_err(conflict_as(Resource::PullRequest))?;

        Ok(())
    }

    /// Assign reviewers, ignoring assignments that already exist
    pub async fn add_reviewers(&self, pr_id: &str, reviewer_ids: &[String]) -> AppResult<()> {
        if reviewer_ids.is_empty() {
            return Ok(());
        }

        let rows = reviewer_ids.iter().map(|reviewer| pull_request_reviewer::ActiveModel {
            pr_id: Set(pr_id.to_string()),
            reviewer_id: Set(reviewer.clone()),
        });

        pull_request_reviewer::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    pull_request_reviewer::Column::PrId,
                    pull_request_reviewer::Column::ReviewerId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Find a pull request with its reviewers, ordered by user ID
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<PullRequest>> {
        let Some(model) = pull_request::Entity::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let reviewers = model
            .find_related(user::Entity)
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some(PullRequest {
            status: PullRequestStatus::from(model.status.as_str()),
            id: model.id,
            name: model.name,
            author_id: model.author_id,
            reviewers: reviewers.into_iter().map(TeamMember::from).collect(),
        }))
    }

    /// Mark a pull request as merged. Merging twice is not an error.
    pub async fn merge(&self, id: &str) -> AppResult<()> {
        let result = pull_request::Entity::update_many()
            .col_expr(pull_request::Column::Status, Expr::value(STATUS_MERGED))
            .filter(pull_request::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Swap one reviewer for another and return the number of rows changed.
    ///
    /// Zero means `old_reviewer` was not assigned to this pull request.
    pub async fn replace_reviewer(
        &self,
        pr_id: &str,
        old_reviewer: &str,
        new_reviewer: &str,
    ) -> AppResult<u64> {
        let result = pull_request_reviewer::Entity::update_many()
            .col_expr(
                pull_request_reviewer::Column::ReviewerId,
                Expr::value(new_reviewer),
            )
            .filter(pull_request_reviewer::Column::PrId.eq(pr_id))
            .filter(pull_request_reviewer::Column::ReviewerId.eq(old_reviewer))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Pull requests the user is assigned to review, ordered by ID
    pub async fn reviews_of(&self, user_id: &str) -> AppResult<Vec<PullRequestShort>> {
        let models = pull_request::Entity::find()
            .inner_join(pull_request_reviewer::Entity)
            .filter(pull_request_reviewer::Column::ReviewerId.eq(user_id))
            .order_by_asc(pull_request::Column::Id)
            .all(self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| PullRequestShort {
                status: PullRequestStatus::from(m.status.as_str()),
                id: m.id,
                name: m.name,
                author_id: m.author_id,
            })
            .collect())
    }
}
