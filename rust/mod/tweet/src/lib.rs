//! Tweet module: picture posts, comments and search.
//!
//! Pages are server-rendered. Reading is open to everyone; posting,
//! editing, deleting and commenting need a session, and only a tweet's
//! owner may edit or delete it.
//!
//! Depends on the `users` table created by the auth module, so the auth
//! module must be constructed first on the same store.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use pictweet_core::{Module, ServiceError};
use pictweet_sql::SQLStore;

use crate::api::TweetApi;
use crate::service::TweetService;

/// Tweet module implementing the Module trait.
pub struct TweetModule {
    service: Arc<TweetService>,
    api: Arc<TweetApi>,
}

impl TweetModule {
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        let service = TweetService::new(sql).map_err(ServiceError::from)?;
        let api = Arc::new(TweetApi::new(service.clone())?);
        Ok(Self { service, api })
    }

    pub fn service(&self) -> &Arc<TweetService> {
        &self.service
    }
}

impl Module for TweetModule {
    fn name(&self) -> &str {
        "tweet"
    }

    fn routes(&self) -> Router {
        api::build_router(self.api.clone())
    }
}
