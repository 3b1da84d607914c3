use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use tower::ServiceExt;

use pictweet_core::{Module, SessionResolver, session_middleware};
use pictweet_sql::SqliteStore;

use crate::AuthModule;
use crate::model::SESSION_COOKIE;
use crate::service::AuthConfig;

fn make_app() -> (Router, AuthModule) {
    let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
    let module = AuthModule::new(sql, AuthConfig::default()).unwrap();
    let resolver: Arc<dyn SessionResolver> = module.resolver();
    let router = module
        .routes()
        .layer(from_fn_with_state(resolver, session_middleware));
    (router, module)
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    form: Option<&str>,
) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    if form.is_some() {
        builder = builder.header("content-type", "application/x-www-form-urlencoded");
    }
    let body = match form {
        Some(f) => Body::from(f.to_string()),
        None => Body::empty(),
    };
    let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

/// `name=value` pair from a `Set-Cookie` header, ready to send back.
fn session_pair(headers: &HeaderMap) -> String {
    let set = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set.starts_with(SESSION_COOKIE));
    set.split(';').next().unwrap().to_string()
}

const SIGN_UP_FORM: &str = "nickname=taro&email=taro%40example.com&password=password&password_confirmation=password";

#[tokio::test]
async fn test_sign_up_sets_cookie_and_redirects() {
    let (router, module) = make_app();

    let (status, _, body) = call(&router, "GET", "/users/sign_up", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"nickname\""));
    assert!(body.contains("name=\"password_confirmation\""));

    let (status, headers, _) = call(&router, "POST", "/users/sign_up", None, Some(SIGN_UP_FORM)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(LOCATION).unwrap(), "/");
    let set = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set.contains("HttpOnly"));

    let user = module.service().find_user_by_email("taro@example.com").unwrap().unwrap();
    assert_eq!(user.nickname, "taro");

    // Signed in: the header shows the nickname menu and the form redirects away.
    let cookie = session_pair(&headers);
    let (status, headers, _) = call(&router, "GET", "/users/sign_up", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_sign_up_invalid_rerenders_form() {
    let (router, _) = make_app();

    let form = "nickname=toolongname&email=bad&password=abc&password_confirmation=xyz";
    let (status, headers, body) = call(&router, "POST", "/users/sign_up", None, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(headers.get(SET_COOKIE).is_none());
    assert!(body.contains("Nickname is too long"));
    assert!(body.contains("Email is invalid"));
    assert!(body.contains("Password is too short"));
    // Entered values survive the round trip.
    assert!(body.contains("value=\"toolongname\""));
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let (router, _) = make_app();
    call(&router, "POST", "/users/sign_up", None, Some(SIGN_UP_FORM)).await;

    let (status, _, body) = call(&router, "POST", "/users/sign_up", None, Some(SIGN_UP_FORM)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Email has already been taken"));
}

#[tokio::test]
async fn test_sign_in_failure_is_unauthorized() {
    let (router, _) = make_app();
    call(&router, "POST", "/users/sign_up", None, Some(SIGN_UP_FORM)).await;

    let form = "email=taro%40example.com&password=wrongpass";
    let (status, headers, body) = call(&router, "POST", "/users/sign_in", None, Some(form)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(SET_COOKIE).is_none());
    assert!(body.contains("Invalid Email or password."));
    assert!(body.contains("value=\"taro@example.com\""));
}

#[tokio::test]
async fn test_sign_in_and_sign_out() {
    let (router, module) = make_app();
    call(&router, "POST", "/users/sign_up", None, Some(SIGN_UP_FORM)).await;

    let (status, _, body) = call(&router, "GET", "/users/sign_in", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"email\""));

    let form = "email=TARO%40example.com&password=password";
    let (status, headers, _) = call(&router, "POST", "/users/sign_in", None, Some(form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let cookie = session_pair(&headers);
    let token = cookie.split_once('=').unwrap().1.to_string();
    let sid = module.service().verify_token(&token).unwrap().sid;

    let (status, headers, _) = call(&router, "POST", "/users/sign_out", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(LOCATION).unwrap(), "/");
    let cleared = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    assert!(module.service().get_session(&sid).unwrap().revoked);
    assert!(module.service().verify_token(&token).is_err());

    // The revoked cookie no longer counts as signed in.
    let (status, _, _) = call(&router, "GET", "/users/sign_in", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_out_without_session() {
    let (router, _) = make_app();
    let (status, headers, _) = call(&router, "DELETE", "/users/sign_out", None, None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(headers.get(SET_COOKIE).is_some());
}
