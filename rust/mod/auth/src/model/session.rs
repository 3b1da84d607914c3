use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "pictweet_session";

/// A sign-in record, used for sign-out and revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session id (UUIDv4, no dashes).
    pub id: String,

    /// User id that owns this session.
    pub user_id: i64,

    /// RFC 3339 timestamp when the token was issued.
    pub issued_at: String,

    /// RFC 3339 timestamp when the token expires.
    pub expires_at: String,

    /// Whether this session has been revoked (signed out).
    #[serde(default)]
    pub revoked: bool,
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,

    /// User nickname.
    pub name: String,

    /// Session id (for revocation).
    pub sid: String,

    /// Issued at (unix timestamp).
    pub iat: i64,

    /// Expiration (unix timestamp).
    pub exp: i64,
}
