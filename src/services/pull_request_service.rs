//! Pull request service - Creation, merge and reviewer reassignment.
//!
//! Creation and reassignment run as single transactions: every lookup,
//! the reviewer draw and the writes either all take effect or none do.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{REPLACEMENT_REVIEWERS, REVIEWERS_PER_PULL_REQUEST};
use crate::domain::{PullRequest, ReviewerPicker, UserReviews};
use crate::errors::{AppError, AppResult, OptionExt, Resource};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Pull request service trait for dependency injection.
#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Open a pull request and assign up to two reviewers from the author's team
    async fn create_pull_request(
        &self,
        id: String,
        name: String,
        author_id: String,
    ) -> AppResult<PullRequest>;

    /// Mark a pull request as merged
    async fn merge_pull_request(&self, id: String) -> AppResult<PullRequest>;

    /// Replace one reviewer with another eligible team member
    async fn reassign_pull_request(
        &self,
        id: String,
        old_reviewer_id: String,
    ) -> AppResult<PullRequest>;

    /// List pull requests the user is assigned to review
    async fn get_user_reviews(&self, user_id: String) -> AppResult<UserReviews>;
}

/// Concrete implementation of PullRequestService using Unit of Work.
pub struct PullRequestManager<U: UnitOfWork> {
    uow: Arc<U>,
    picker: Arc<ReviewerPicker>,
}

impl<U: UnitOfWork> PullRequestManager<U> {
    /// Create new pull request service instance
    pub fn new(uow: Arc<U>, picker: Arc<ReviewerPicker>) -> Self {
        Self { uow, picker }
    }
}

async fn create_pull_request_in(
    ctx: TransactionContext<'_>,
    picker: &ReviewerPicker,
    id: String,
    name: String,
    author_id: String,
) -> AppResult<PullRequest> {
    if ctx.pull_requests().exists(&id).await? {
        return Err(AppError::AlreadyExists(Resource::PullRequest));
    }

    let author = ctx.users().find_by_id(&author_id).await?.ok_or_not_found()?;
    let team_name = author.team_name.ok_or(AppError::NotFound)?;
    let team = ctx.teams().find_by_name(&team_name).await?.ok_or_not_found()?;

    let reviewers = picker.pick(&author_id, &team.members, REVIEWERS_PER_PULL_REQUEST, &[])?;

    ctx.pull_requests().create(&id, &name, &author_id).await?;
    ctx.pull_requests().add_reviewers(&id, &reviewers).await?;

    ctx.pull_requests().find_by_id(&id).await?.ok_or_not_found()
}

async fn reassign_in(
    ctx: TransactionContext<'_>,
    picker: &ReviewerPicker,
    id: String,
    old_reviewer_id: String,
) -> AppResult<PullRequest> {
    let pr = ctx.pull_requests().find_by_id(&id).await?.ok_or_not_found()?;

    if !ctx.users().exists(&old_reviewer_id).await? {
        return Err(AppError::NotFound);
    }

    if pr.status.is_merged() {
        return Err(AppError::AlreadyMerged);
    }

    let current = pr.reviewer_ids();

    let author = ctx.users().find_by_id(&pr.author_id).await?.ok_or_not_found()?;
    if old_reviewer_id == author.user_id {
        return Err(AppError::UserNotAssigned);
    }

    let team_name = author.team_name.ok_or(AppError::NotFound)?;
    let team = ctx.teams().find_by_name(&team_name).await?.ok_or_not_found()?;

    let replacement = picker
        .pick(&author.user_id, &team.members, REPLACEMENT_REVIEWERS, &current)?
        .into_iter()
        .next()
        .ok_or(AppError::NoReviewersAvailable)?;

    let replaced = ctx
        .pull_requests()
        .replace_reviewer(&id, &old_reviewer_id, &replacement)
        .await?;

    if replaced == 0 {
        tracing::warn!(
            pull_request_id = %id,
            old_reviewer_id = %old_reviewer_id,
            "Reviewer was not assigned; nothing reassigned"
        );
    } else {
        tracing::info!(
            pull_request_id = %id,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %replacement,
            "Reviewer reassigned"
        );
    }

    ctx.pull_requests().find_by_id(&id).await?.ok_or_not_found()
}

#[async_trait]
impl<U: UnitOfWork> PullRequestService for PullRequestManager<U> {
    async fn create_pull_request(
        &self,
        id: String,
        name: String,
        author_id: String,
    ) -> AppResult<PullRequest> {
        let picker = self.picker.clone();
        let pr = with_transaction!(self.uow, |ctx| {
            create_pull_request_in(ctx, &picker, id, name, author_id).await
        })?;

        tracing::info!(
            pull_request_id = %pr.id,
            reviewers = ?pr.reviewer_ids(),
            "Pull request created"
        );

        Ok(pr)
    }

    async fn merge_pull_request(&self, id: String) -> AppResult<PullRequest> {
        let prs = self.uow.pull_requests();
        prs.merge(&id).await?;

        tracing::info!(pull_request_id = %id, "Pull request merged");

        prs.find_by_id(&id).await?.ok_or_not_found()
    }

    async fn reassign_pull_request(
        &self,
        id: String,
        old_reviewer_id: String,
    ) -> AppResult<PullRequest> {
        let picker = self.picker.clone();
        with_transaction!(self.uow, |ctx| {
            reassign_in(ctx, &picker, id, old_reviewer_id).await
        })
    }

    async fn get_user_reviews(&self, user_id: String) -> AppResult<UserReviews> {
        if !self.uow.users().exists(&user_id).await? {
            return Err(AppError::NotFound);
        }

        let pull_requests = self.uow.pull_requests().reviews_of(&user_id).await?;

        Ok(UserReviews {
            user_id,
            pull_requests,
        })
    }
}
