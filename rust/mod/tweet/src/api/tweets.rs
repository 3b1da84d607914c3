use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use minijinja::context;
use serde::Deserialize;

use pictweet_core::{CurrentUser, Identity, RequireUser, ServiceError, ValidationErrors};

use crate::api::AppState;
use crate::model::{MethodOverrideForm, OverrideMethod, TweetForm};
use crate::service::TweetError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/tweets", get(index).post(create))
        .route("/tweets/new", get(new_tweet))
        .route("/tweets/search", get(search))
        .route(
            "/tweets/{id}",
            get(show).patch(update).delete(destroy).post(method_override),
        )
        .route("/tweets/{id}/edit", get(edit))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    keyword: Option<String>,
}

/// GET / and GET /tweets: every tweet, newest first.
async fn index(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Html<String>, ServiceError> {
    let tweets = api.svc.list_tweets()?;
    api.views
        .render("index.html", context! { current_user, tweets })
}

/// GET /tweets/search?keyword=
async fn search(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, ServiceError> {
    let tweets = api.svc.search_tweets(query.keyword.as_deref())?;
    api.views.render(
        "search.html",
        context! { current_user, tweets, keyword => query.keyword },
    )
}

/// GET /tweets/new
async fn new_tweet(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Html<String>, ServiceError> {
    api.views.render(
        "new.html",
        context! {
            current_user => user,
            tweet => TweetForm::default(),
            errors => ValidationErrors::new(),
        },
    )
}

/// POST /tweets
async fn create(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<TweetForm>,
) -> Result<Response, ServiceError> {
    match api.svc.create_tweet(&user, form.clone()) {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(TweetError::Invalid(errors)) => {
            let page = api.views.render(
                "new.html",
                context! { current_user => user, tweet => form, errors },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /tweets/{id}
async fn show(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, ServiceError> {
    render_show(&api, current_user, id, "", ValidationErrors::new())
}

/// Tweet page with its comments and, for signed-in users, the comment form.
pub(super) fn render_show(
    api: &AppState,
    current_user: Option<Identity>,
    id: i64,
    comment_text: &str,
    errors: ValidationErrors,
) -> Result<Html<String>, ServiceError> {
    let tweet = api.svc.get_tweet(id)?;
    let comments = api.svc.list_comments(id)?;
    api.views.render(
        "show.html",
        context! { current_user, tweet, comments, comment_text, errors },
    )
}

/// GET /tweets/{id}/edit: owner only.
async fn edit(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, ServiceError> {
    let tweet = api.svc.get_owned_tweet(&user, id)?;
    api.views.render(
        "edit.html",
        context! { current_user => user, tweet, errors => ValidationErrors::new() },
    )
}

/// PATCH /tweets/{id}: owner only.
async fn update(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Form(form): Form<TweetForm>,
) -> Result<Response, ServiceError> {
    apply_update(&api, user, id, form)
}

/// DELETE /tweets/{id}: owner only.
async fn destroy(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    apply_destroy(&api, user, id)
}

/// POST /tweets/{id} with `_method=patch|delete` from the HTML forms.
async fn method_override(
    State(api): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Form(form): Form<MethodOverrideForm>,
) -> Result<Response, ServiceError> {
    match form.method() {
        Some(OverrideMethod::Patch) => apply_update(&api, user, id, form.into_tweet_form()),
        Some(OverrideMethod::Delete) => apply_destroy(&api, user, id),
        None => Err(ServiceError::Validation(format!(
            "unsupported _method {:?}",
            form.method
        ))),
    }
}

fn apply_update(
    api: &AppState,
    user: Identity,
    id: i64,
    form: TweetForm,
) -> Result<Response, ServiceError> {
    match api.svc.update_tweet(&user, id, form.clone()) {
        Ok(tweet) => {
            let page = api
                .views
                .render("update.html", context! { current_user => user, tweet })?;
            Ok(page.into_response())
        }
        Err(TweetError::Invalid(errors)) => {
            let page = api.views.render(
                "edit.html",
                context! {
                    current_user => user,
                    tweet => context! { id, text => form.text, image => form.image },
                    errors,
                },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn apply_destroy(api: &AppState, user: Identity, id: i64) -> Result<Response, ServiceError> {
    api.svc.destroy_tweet(&user, id)?;
    let page = api
        .views
        .render("destroy.html", context! { current_user => user })?;
    Ok(page.into_response())
}
