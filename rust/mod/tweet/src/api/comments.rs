use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};

use pictweet_core::{RequireUser, ServiceError};

use crate::api::AppState;
use crate::api::tweets::render_show;
use crate::model::CommentForm;
use crate::service::TweetError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/tweets/{id}/comments", post(create))
}

/// POST /tweets/{id}/comments
async fn create(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, ServiceError> {
    let text = form.text.clone();
    match api.svc.create_comment(&user, id, form) {
        Ok(_) => Ok(Redirect::to(&format!("/tweets/{}", id)).into_response()),
        Err(TweetError::Invalid(errors)) => {
            let page = render_show(&api, Some(user), id, &text, errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
