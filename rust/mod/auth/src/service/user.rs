use pictweet_core::{ValidationErrors, now_rfc3339};
use pictweet_sql::{Row, SQLError, Value};

use crate::model::{SignUpForm, User, normalize_email};
use crate::service::password::{hash_password, verify_password};
use crate::service::{AuthError, AuthService};

const USER_COLUMNS: &str = "id, nickname, email, password_hash, created_at, updated_at";

/// Message shown for any failed sign-in, whichever half was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid Email or password.";

impl TryFrom<&Row> for User {
    type Error = SQLError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.int("id")?,
            nickname: row.text("nickname")?,
            email: row.text("email")?,
            password_hash: row.text("password_hash")?,
            created_at: row.text("created_at")?,
            updated_at: row.text("updated_at")?,
        })
    }
}

fn email_taken() -> ValidationErrors {
    let mut errs = ValidationErrors::new();
    errs.add("email", "Email has already been taken");
    errs
}

impl AuthService {
    /// Register a new account.
    pub fn register(&self, form: SignUpForm) -> Result<User, AuthError> {
        form.validate().map_err(AuthError::Invalid)?;

        let email = normalize_email(&form.email);
        if self.find_user_by_email(&email)?.is_some() {
            return Err(AuthError::Invalid(email_taken()));
        }

        let now = now_rfc3339();
        let password_hash = hash_password(&form.password)?;
        let nickname = form.nickname.trim().to_string();

        let row = self
            .sql
            .query_one(
                "INSERT INTO users (nickname, email, password_hash, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4) RETURNING id",
                &[
                    Value::Text(nickname.clone()),
                    Value::Text(email.clone()),
                    Value::Text(password_hash.clone()),
                    Value::Text(now.clone()),
                ],
            )
            .map_err(|e| {
                // Lost a race with another sign-up for the same address.
                if e.is_unique_violation() {
                    AuthError::Invalid(email_taken())
                } else {
                    AuthError::from(e)
                }
            })?
            .ok_or_else(|| AuthError::Internal("insert returned no id".into()))?;

        let user = User {
            id: row.int("id")?,
            nickname,
            email,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        };
        tracing::info!(user_id = user.id, "registered user {}", user.nickname);
        Ok(user)
    }

    /// Find a user by email (normalized before lookup).
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = self.sql.query_one(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            &[Value::Text(normalize_email(email))],
        )?;
        match row {
            Some(row) => Ok(Some(User::try_from(&row)?)),
            None => Ok(None),
        }
    }

    /// Check an email/password pair.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        match self.find_user_by_email(email)? {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => {
                tracing::debug!("failed sign-in attempt");
                Err(AuthError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{sign_up, test_service};

    #[test]
    fn test_register_and_find() {
        let svc = test_service();

        let user = sign_up(&svc, "taro", " Taro@Example.com ");
        assert_eq!(user.nickname, "taro");
        assert_eq!(user.email, "taro@example.com");
        assert!(user.password_hash.starts_with("$argon2id$"));

        let fetched = svc.find_user_by_email("TARO@example.com").unwrap().unwrap();
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.created_at, user.created_at);

        assert!(svc.find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_register_rejects_invalid_form() {
        let svc = test_service();
        let err = svc
            .register(SignUpForm {
                nickname: String::new(),
                email: "a@b".into(),
                password: "password".into(),
                password_confirmation: "password".into(),
            })
            .unwrap_err();
        match err {
            AuthError::Invalid(errs) => assert!(errs.has("nickname")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_register_duplicate_email() {
        let svc = test_service();
        sign_up(&svc, "taro", "taro@example.com");

        let err = svc
            .register(SignUpForm {
                nickname: "jiro".into(),
                email: "TARO@example.com".into(),
                password: "password".into(),
                password_confirmation: "password".into(),
            })
            .unwrap_err();
        match err {
            AuthError::Invalid(errs) => assert!(errs.has("email")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_authenticate() {
        let svc = test_service();
        let user = sign_up(&svc, "hanako", "hanako@example.com");

        let ok = svc.authenticate("Hanako@example.com", "password").unwrap();
        assert_eq!(ok.id, user.id);

        assert!(matches!(
            svc.authenticate("hanako@example.com", "wrong-password"),
            Err(AuthError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.authenticate("nobody@example.com", "password"),
            Err(AuthError::Unauthorized(_))
        ));
    }
}
