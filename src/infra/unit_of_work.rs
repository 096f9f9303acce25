//! Unit of Work pattern implementation.
//!
//! Repositories are bound to an explicit execution context. Outside a
//! transaction they run on the pooled connection; inside one they borrow the
//! open `DatabaseTransaction` through [`TransactionContext`], so every step of
//! a multi-step operation shares the same transaction without any ambient
//! state.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};

use super::repositories::{PullRequestStore, TeamStore, UserStore};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transactional closures
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Provides repository access on the shared connection and transaction
/// management. Not mockable directly due to the generic `transaction` method;
/// mock at the service level instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// User repository on the pooled connection
    fn users(&self) -> UserStore<'_, DatabaseConnection>;

    /// Team repository on the pooled connection
    fn teams(&self) -> TeamStore<'_, DatabaseConnection>;

    /// Pull request repository on the pooled connection
    fn pull_requests(&self) -> PullRequestStore<'_, DatabaseConnection>;

    /// Execute a closure within a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back otherwise. Dropping
    /// the returned future before completion drops the transaction, which
    /// also rolls it back.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> UserStore<'a, DatabaseTransaction> {
        UserStore::new(self.txn)
    }

    pub fn teams(&self) -> TeamStore<'a, DatabaseTransaction> {
        TeamStore::new(self.txn)
    }

    pub fn pull_requests(&self) -> PullRequestStore<'a, DatabaseTransaction> {
        PullRequestStore::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Read Committed, read-write on Postgres; backend defaults elsewhere
    fn transaction_config(&self) -> (Option<IsolationLevel>, Option<AccessMode>) {
        match self.db.get_database_backend() {
            DatabaseBackend::Postgres => (
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            ),
            _ => (None, None),
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> UserStore<'_, DatabaseConnection> {
        UserStore::new(&self.db)
    }

    fn teams(&self) -> TeamStore<'_, DatabaseConnection> {
        TeamStore::new(&self.db)
    }

    fn pull_requests(&self) -> PullRequestStore<'_, DatabaseConnection> {
        PullRequestStore::new(&self.db)
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let (isolation, access) = self.transaction_config();
        let txn = self.db.begin_with_config(isolation, access).await?;

        let outcome = f(TransactionContext::new(&txn)).await;

        match outcome {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %e, "Transaction rollback failed: {}", rollback_err);
                    return Err(AppError::Database(rollback_err));
                }
                Err(e)
            }
        }
    }
}

/// Run `$body` inside a transaction with `$ctx` bound to its context.
///
/// The body is moved into the transaction future, so it may only capture
/// owned values.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
