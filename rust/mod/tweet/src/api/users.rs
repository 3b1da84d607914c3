use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use minijinja::context;

use pictweet_core::{CurrentUser, ServiceError};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{id}", get(show))
}

/// GET /users/{id}: one user's tweets.
async fn show(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, ServiceError> {
    let nickname = api.svc.author_nickname(id)?;
    let tweets = api.svc.list_tweets_by_user(id)?;
    api.views
        .render("user.html", context! { current_user, nickname, tweets })
}
