use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use pictweet_core::{Identity, SessionResolver, cookie_value, format_rfc3339, new_id};
use pictweet_sql::{Row, SQLError, Value};

use crate::model::{Claims, SESSION_COOKIE, Session, User};
use crate::service::{AuthError, AuthService};

impl TryFrom<&Row> for Session {
    type Error = SQLError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Session {
            id: row.text("id")?,
            user_id: row.int("user_id")?,
            issued_at: row.text("issued_at")?,
            expires_at: row.text("expires_at")?,
            revoked: row.int("revoked")? != 0,
        })
    }
}

impl AuthService {
    /// Start a session for a user and return the signed token for the cookie.
    pub fn issue_session(&self, user: &User) -> Result<String, AuthError> {
        let session_id = new_id();
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(self.config.session_ttl);

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.nickname.clone(),
            sid: session_id.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))?;

        self.sql.exec(
            "INSERT INTO sessions (id, user_id, revoked, issued_at, expires_at)
             VALUES (?1, ?2, 0, ?3, ?4)",
            &[
                Value::Text(session_id),
                Value::Integer(user.id),
                Value::Text(format_rfc3339(now)),
                Value::Text(format_rfc3339(exp)),
            ],
        )?;

        tracing::info!(user_id = user.id, "signed in");
        Ok(token)
    }

    /// Verify and decode a session token.
    /// Returns the claims if the signature is valid, the token has not
    /// expired, and its session exists and is not revoked.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        let claims = token_data.claims;
        let session = self
            .get_session(&claims.sid)
            .map_err(|_| AuthError::Unauthorized("unknown session".into()))?;
        if session.revoked {
            return Err(AuthError::Unauthorized("session has been revoked".into()));
        }

        Ok(claims)
    }

    /// Revoke a session (its token stops resolving).
    pub fn revoke_session(&self, session_id: &str) -> Result<(), AuthError> {
        let affected = self.sql.exec(
            "UPDATE sessions SET revoked = 1 WHERE id = ?1",
            &[Value::Text(session_id.to_string())],
        )?;
        if affected == 0 {
            return Err(AuthError::NotFound(format!("session {}", session_id)));
        }
        Ok(())
    }

    /// Get a session by id.
    pub fn get_session(&self, id: &str) -> Result<Session, AuthError> {
        let row = self
            .sql
            .query_one(
                "SELECT id, user_id, revoked, issued_at, expires_at FROM sessions WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )?
            .ok_or_else(|| AuthError::NotFound(format!("session {}", id)))?;
        Ok(Session::try_from(&row)?)
    }
}

impl SessionResolver for AuthService {
    fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = cookie_value(headers, SESSION_COOKIE)?;
        let claims = match self.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("ignoring session cookie: {}", e);
                return None;
            }
        };
        let user_id = claims.sub.parse().ok()?;
        Some(Identity {
            user_id,
            nickname: claims.name,
        })
    }
}
