pub mod password;
pub mod schema;
pub mod session;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use pictweet_core::{ServiceError, ValidationErrors};
use pictweet_sql::{SQLError, SQLStore};

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A submitted form broke one or more rules.
    #[error("invalid: {0}")]
    Invalid(ValidationErrors),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<SQLError> for AuthError {
    fn from(e: SQLError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NotFound(m) => ServiceError::NotFound(m),
            AuthError::Invalid(errs) => ServiceError::Validation(errs.to_string()),
            AuthError::Unauthorized(m) => ServiceError::Unauthorized(m),
            AuthError::Storage(m) => ServiceError::Storage(m),
            AuthError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Session lifetime in seconds (default: 7 days).
    pub session_ttl: i64,
    /// Add `Secure` to the session cookie (HTTPS deployments).
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "pictweet-dev-secret-change-me".to_string(),
            session_ttl: 604800, // 7 days
            secure_cookie: false,
        }
    }
}

/// The Auth service. Holds the SQL store and configuration.
pub struct AuthService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) config: AuthConfig,
}

impl AuthService {
    /// Create a new AuthService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>, config: AuthConfig) -> Result<Arc<Self>, AuthError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql, config }))
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use pictweet_sql::SqliteStore;

    use super::{AuthConfig, AuthService};
    use crate::model::{SignUpForm, User};

    pub fn test_service() -> Arc<AuthService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    pub fn sign_up(svc: &AuthService, nickname: &str, email: &str) -> User {
        svc.register(SignUpForm {
            nickname: nickname.to_string(),
            email: email.to_string(),
            password: "password".to_string(),
            password_confirmation: "password".to_string(),
        })
        .unwrap()
    }
}
