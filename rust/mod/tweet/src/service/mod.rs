pub mod comment;
pub mod schema;
pub mod search;
pub mod tweet;

use std::sync::Arc;

use thiserror::Error;

use pictweet_core::{ServiceError, ValidationErrors};
use pictweet_sql::{SQLError, SQLStore};

/// Tweet service error type.
#[derive(Debug, Error)]
pub enum TweetError {
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is signed in but does not own the tweet.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid: {0}")]
    Invalid(ValidationErrors),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<SQLError> for TweetError {
    fn from(e: SQLError) -> Self {
        TweetError::Storage(e.to_string())
    }
}

impl From<TweetError> for ServiceError {
    fn from(e: TweetError) -> Self {
        match e {
            TweetError::NotFound(m) => ServiceError::NotFound(m),
            TweetError::Forbidden(m) => ServiceError::PermissionDenied(m),
            TweetError::Invalid(errs) => ServiceError::Validation(errs.to_string()),
            TweetError::Storage(m) => ServiceError::Storage(m),
            TweetError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Tweets, comments and search over a shared SQL store.
pub struct TweetService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl TweetService {
    /// Create a new TweetService, initializing the DB schema.
    ///
    /// The `users` table must already exist.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, TweetError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }
}
