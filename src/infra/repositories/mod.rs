//! Repository layer - Data access abstraction
//!
//! Each store borrows an execution context (`DatabaseConnection` or
//! `DatabaseTransaction`) so the same queries run inside or outside a
//! unit of work.

use sea_orm::{DbErr, SqlErr};

use crate::errors::{AppError, Resource};

pub(crate) mod entities;
mod pull_request_repository;
mod team_repository;
mod user_repository;

pub use pull_request_repository::PullRequestStore;
pub use team_repository::TeamStore;
pub use user_repository::UserStore;

/// Map a unique or primary key violation on insert to `AlreadyExists`
fn conflict_as(resource: Resource) -> impl FnOnce(DbErr) -> AppError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists(resource),
        _ => AppError::Database(err),
    }
}
