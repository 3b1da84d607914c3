use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;

use pictweet_core::{Module, ServiceError, SessionResolver, session_middleware};

/// Build the main application router.
///
/// Module routes carry absolute paths and are merged as they are; the
/// session middleware wraps everything so every handler sees the
/// resolved identity.
pub fn build_router(modules: &[&dyn Module], resolver: Arc<dyn SessionResolver>) -> Router {
    let mut app: Router<()> = Router::new().route("/health", get(health));

    for module in modules {
        tracing::debug!("mounting routes of module {}", module.name());
        app = app.merge(module.routes());
    }

    app.fallback(not_found)
        .layer(middleware::from_fn_with_state(resolver, session_middleware))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "name": "pictweetd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ServiceError {
    ServiceError::NotFound("page not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{HeaderMap, Request, StatusCode};
    use tower::ServiceExt;

    use auth::AuthModule;
    use auth::service::AuthConfig;
    use pictweet_sql::SqliteStore;
    use tweet::TweetModule;

    struct Server {
        router: Router,
        tweet: TweetModule,
        _dir: tempfile::TempDir,
    }

    fn server() -> Server {
        let dir = tempfile::tempdir().unwrap();
        let sql = Arc::new(SqliteStore::open(&dir.path().join("data.sqlite")).unwrap());
        let auth = AuthModule::new(sql.clone(), AuthConfig::default()).unwrap();
        let tweet = TweetModule::new(sql).unwrap();
        let modules: [&dyn Module; 2] = [&auth, &tweet];
        let router = build_router(&modules, auth.resolver());
        Server {
            router,
            tweet,
            _dir: dir,
        }
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
        let body = form.map(|f| Body::from(f.to_string())).unwrap_or_else(Body::empty);
        let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, headers, String::from_utf8_lossy(&bytes).into_owned())
    }

    fn cookie_from(headers: &HeaderMap) -> String {
        let set = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        set.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let s = server();
        let (status, _, body) = call(&s.router, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["name"], "pictweetd");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let s = server();
        let (status, _, body) = call(&s.router, "GET", "/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_sign_up_post_and_sign_out() {
        let s = server();

        let signup = "nickname=taro&email=taro%40example.com&password=password&password_confirmation=password";
        let (status, headers, _) =
            call(&s.router, "POST", "/users/sign_up", None, Some(signup)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let cookie = cookie_from(&headers);

        // Signed in: the layout shows the posting link.
        let (_, _, body) = call(&s.router, "GET", "/", Some(&cookie), None).await;
        assert!(body.contains("/tweets/new"));

        let tweet = "text=hello&image=http%3A%2F%2Fx%2Fa.png";
        let (status, headers, _) =
            call(&s.router, "POST", "/tweets", Some(&cookie), Some(tweet)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(LOCATION).unwrap(), "/");
        assert_eq!(s.tweet.service().count_tweets().unwrap(), 1);

        let (status, _, body) = call(&s.router, "GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("hello"));

        let (status, _, _) = call(&s.router, "POST", "/users/sign_out", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        // The old cookie no longer opens gated pages.
        let (status, headers, _) =
            call(&s.router, "GET", "/tweets/new", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(LOCATION).unwrap(), "/");
    }
}
