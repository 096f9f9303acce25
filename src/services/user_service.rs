//! User service - Handles user activity status.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::User;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Set the user's activity flag and return the updated user
    async fn set_is_active(&self, user_id: String, is_active: bool) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

async fn set_is_active_in(
    ctx: TransactionContext<'_>,
    user_id: String,
    is_active: bool,
) -> AppResult<User> {
    ctx.users().set_is_active(&user_id, is_active).await?;
    ctx.users().find_by_id(&user_id).await?.ok_or_not_found()
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn set_is_active(&self, user_id: String, is_active: bool) -> AppResult<User> {
        let user = with_transaction!(self.uow, |ctx| {
            set_is_active_in(ctx, user_id, is_active).await
        })?;

        tracing::info!(user_id = %user.user_id, is_active, "User activity updated");
        Ok(user)
    }
}
