//! Auth module: accounts, password sign-in and cookie sessions.
//!
//! # Resources
//!
//! - **User**: nickname + email + argon2id password hash
//! - **Session**: one sign-in; its id travels inside a signed JWT
//!   stored in the `pictweet_session` cookie
//!
//! The module also provides the [`SessionResolver`] the server installs
//! in front of every route, which turns that cookie into an
//! [`Identity`](pictweet_core::Identity).
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::AuthConfig};
//!
//! let module = AuthModule::new(sql, AuthConfig::default())?;
//! let resolver = module.resolver();
//! let router = module.routes(); // /users/sign_up, /users/sign_in, /users/sign_out
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use pictweet_core::{Module, ServiceError, SessionResolver};
use pictweet_sql::SQLStore;

use crate::api::AuthApi;
use crate::service::{AuthConfig, AuthService};

/// Auth module implementing the Module trait.
pub struct AuthModule {
    service: Arc<AuthService>,
    api: Arc<AuthApi>,
}

impl AuthModule {
    /// Create a new AuthModule, creating the `users` and `sessions` tables.
    pub fn new(sql: Arc<dyn SQLStore>, config: AuthConfig) -> Result<Self, ServiceError> {
        let service = AuthService::new(sql, config).map_err(ServiceError::from)?;
        let api = Arc::new(AuthApi::new(service.clone())?);
        Ok(Self { service, api })
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }

    /// The session resolver to install with `session_middleware`.
    pub fn resolver(&self) -> Arc<dyn SessionResolver> {
        self.service.clone()
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(self.api.clone())
    }
}
