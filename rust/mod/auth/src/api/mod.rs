mod registrations;
mod sessions;

use std::sync::Arc;

use axum::Router;

use pictweet_core::{ServiceError, Views};

use crate::model::SESSION_COOKIE;
use crate::service::{AuthConfig, AuthService};

/// Shared state for the sign-up / sign-in pages.
pub struct AuthApi {
    pub(crate) svc: Arc<AuthService>,
    pub(crate) views: Views,
}

impl AuthApi {
    pub fn new(svc: Arc<AuthService>) -> Result<Self, ServiceError> {
        let views = Views::new(&[
            ("sign_up.html", include_str!("../../templates/sign_up.html")),
            ("sign_in.html", include_str!("../../templates/sign_in.html")),
        ])?;
        Ok(Self { svc, views })
    }
}

/// Shared application state.
pub type AppState = Arc<AuthApi>;

/// Build the account router. Paths are absolute (`/users/...`).
///
/// Handlers read the session through `CurrentUser`, so the server must
/// wrap the merged router in `session_middleware`.
pub fn build_router(api: Arc<AuthApi>) -> Router {
    Router::new()
        .merge(registrations::routes())
        .merge(sessions::routes())
        .with_state(api)
}

/// `Set-Cookie` value carrying a freshly issued session token.
pub(crate) fn session_cookie(config: &AuthConfig, token: &str) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, config.session_ttl
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub(crate) fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests;
