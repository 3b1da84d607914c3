//! Session identity for request handlers.
//!
//! Business modules never look up the session themselves. The server
//! installs [`session_middleware`] with a [`SessionResolver`] (provided by
//! the auth module); handlers receive the result explicitly through the
//! [`CurrentUser`] or [`RequireUser`] extractors.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{Redirect, Response};
use serde::{Deserialize, Serialize};

/// The signed-in user, as seen by request handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub nickname: String,
}

/// Pluggable session lookup. The concrete implementation is injected at
/// startup; an absent or invalid session yields `None`, never an error.
pub trait SessionResolver: Send + Sync + 'static {
    fn resolve(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Middleware that resolves the session on every request and stores the
/// [`Identity`] in request extensions. Requests without a session pass
/// through untouched.
pub async fn session_middleware(
    State(resolver): State<Arc<dyn SessionResolver>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(identity) = resolver.resolve(request.headers()) {
        request.extensions_mut().insert(identity);
    }
    next.run(request).await
}

/// Extractor for routes open to everyone: the identity if signed in.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<Identity>().cloned()))
    }
}

/// Extractor for gated routes. Without a session the handler never runs
/// and the client is redirected to the top page.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(identity) => Ok(RequireUser(identity.clone())),
            None => {
                tracing::debug!("unauthenticated {} {}, redirecting", parts.method, parts.uri.path());
                Err(Redirect::to("/"))
            }
        }
    }
}

/// Find a cookie by name across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}
