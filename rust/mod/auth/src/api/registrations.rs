use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use minijinja::context;

use pictweet_core::{CurrentUser, ServiceError, ValidationErrors};

use crate::api::{AppState, session_cookie};
use crate::model::SignUpForm;
use crate::service::AuthError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/sign_up", get(new_registration).post(create_registration))
}

/// GET /users/sign_up: registration form.
async fn new_registration(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Response, ServiceError> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    let page = api.views.render(
        "sign_up.html",
        context! {
            nickname => "",
            email => "",
            errors => ValidationErrors::new(),
        },
    )?;
    Ok(page.into_response())
}

/// POST /users/sign_up: create the account and sign it in.
async fn create_registration(
    State(api): State<AppState>,
    Form(form): Form<SignUpForm>,
) -> Result<Response, ServiceError> {
    let nickname = form.nickname.clone();
    let email = form.email.clone();

    match api.svc.register(form) {
        Ok(user) => {
            let token = api.svc.issue_session(&user)?;
            let cookie = session_cookie(api.svc.config(), &token);
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(AuthError::Invalid(errors)) => {
            let page = api.views.render(
                "sign_up.html",
                context! { nickname, email, errors },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
