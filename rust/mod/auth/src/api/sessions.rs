use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use minijinja::context;

use pictweet_core::{CurrentUser, ServiceError, cookie_value};

use crate::api::{AppState, clear_session_cookie, session_cookie};
use crate::model::{SESSION_COOKIE, SignInForm};
use crate::service::AuthError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/sign_in", get(new_session).post(create_session))
        .route("/users/sign_out", post(destroy_session).delete(destroy_session))
}

/// GET /users/sign_in: sign-in form.
async fn new_session(
    State(api): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Response, ServiceError> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    let page = api
        .views
        .render("sign_in.html", context! { email => "", alert => () })?;
    Ok(page.into_response())
}

/// POST /users/sign_in: check credentials and set the session cookie.
async fn create_session(
    State(api): State<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, ServiceError> {
    match api.svc.authenticate(&form.email, &form.password) {
        Ok(user) => {
            let token = api.svc.issue_session(&user)?;
            let cookie = session_cookie(api.svc.config(), &token);
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(AuthError::Unauthorized(alert)) => {
            let page = api.views.render(
                "sign_in.html",
                context! { email => form.email, alert },
            )?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST|DELETE /users/sign_out: revoke the session and drop the cookie.
///
/// Always succeeds: a missing or stale cookie is simply cleared.
async fn destroy_session(State(api): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        if let Ok(claims) = api.svc.verify_token(token) {
            if let Err(e) = api.svc.revoke_session(&claims.sid) {
                tracing::warn!("failed to revoke session {}: {}", claims.sid, e);
            }
        }
    }
    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/")).into_response()
}
