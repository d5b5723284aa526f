//! Error type returned by repository adapters.
//!
//! Storage adapters keep unique-index violations apart from every other
//! failure so the domain layer can turn them into conflict errors even when
//! its own pre-check lost a race.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique index rejected the write; carries the driver message.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Classify a SeaORM error, attaching `context` to non-constraint failures.
    pub fn from_db(err: DbErr, context: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::UniqueViolation(msg),
            _ => Self::Other(anyhow::Error::new(err).context(context)),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

/// `.repo_ctx("...")` on SeaORM results, in the spirit of `anyhow::Context`.
pub trait DbResultExt<T> {
    fn repo_ctx(self, context: &'static str) -> RepoResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn repo_ctx(self, context: &'static str) -> RepoResult<T> {
        self.map_err(|e| RepoError::from_db(e, context))
    }
}
