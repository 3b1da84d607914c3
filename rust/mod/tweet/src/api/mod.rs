mod comments;
mod tweets;
mod users;

use std::sync::Arc;

use axum::Router;

use pictweet_core::{ServiceError, Views};

use crate::service::TweetService;

/// Shared state for the tweet pages.
pub struct TweetApi {
    pub(crate) svc: Arc<TweetService>,
    pub(crate) views: Views,
}

impl TweetApi {
    pub fn new(svc: Arc<TweetService>) -> Result<Self, ServiceError> {
        let views = Views::new(&[
            ("_tweet.html", include_str!("../../templates/_tweet.html")),
            ("_errors.html", include_str!("../../templates/_errors.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("search.html", include_str!("../../templates/search.html")),
            ("new.html", include_str!("../../templates/new.html")),
            ("edit.html", include_str!("../../templates/edit.html")),
            ("show.html", include_str!("../../templates/show.html")),
            ("update.html", include_str!("../../templates/update.html")),
            ("destroy.html", include_str!("../../templates/destroy.html")),
            ("user.html", include_str!("../../templates/user.html")),
        ])?;
        Ok(Self { svc, views })
    }
}

/// Shared application state.
pub type AppState = Arc<TweetApi>;

/// Build the tweet router. Paths are absolute.
///
/// Gated handlers take `RequireUser`, so the server must wrap the merged
/// router in `session_middleware`.
pub fn build_router(api: Arc<TweetApi>) -> Router {
    Router::new()
        .merge(tweets::routes())
        .merge(comments::routes())
        .merge(users::routes())
        .with_state(api)
}
