use serde::{Deserialize, Serialize};

use pictweet_core::ValidationErrors;

/// Longest nickname accepted at sign-up, in characters.
pub const NICKNAME_MAX_CHARS: usize = 6;

/// Shortest password accepted at sign-up, in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Display name shown next to tweets and comments.
    pub nickname: String,

    /// Login email, stored trimmed and lowercased.
    pub email: String,

    /// Argon2id PHC string. Never rendered.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Registration form (`POST /users/sign_up`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

impl SignUpForm {
    /// Check every field rule that does not need the database.
    /// Email uniqueness is checked by the service.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();

        if errs.require("nickname", "Nickname", &self.nickname) {
            errs.max_chars("nickname", "Nickname", self.nickname.trim(), NICKNAME_MAX_CHARS);
        }

        if errs.require("email", "Email", &self.email) && !self.email.contains('@') {
            errs.add("email", "Email is invalid");
        }

        if errs.require("password", "Password", &self.password)
            && self.password.chars().count() < PASSWORD_MIN_CHARS
        {
            errs.add(
                "password",
                format!(
                    "Password is too short (minimum is {} characters)",
                    PASSWORD_MIN_CHARS
                ),
            );
        }

        if self.password != self.password_confirmation {
            errs.add(
                "password_confirmation",
                "Password confirmation doesn't match Password",
            );
        }

        errs.into_result()
    }
}

/// Sign-in form (`POST /users/sign_in`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(nickname: &str, email: &str, password: &str, confirmation: &str) -> SignUpForm {
        SignUpForm {
            nickname: nickname.into(),
            email: email.into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn valid_sign_up() {
        assert!(form("taro", "taro@example.com", "secret1", "secret1").validate().is_ok());
    }

    #[test]
    fn nickname_rules() {
        let errs = form("", "a@b", "secret1", "secret1").validate().unwrap_err();
        assert!(errs.has("nickname"));
        let errs = form("sevench", "a@b", "secret1", "secret1").validate().unwrap_err();
        assert!(errs.has("nickname"));
        assert!(form("sixchr", "a@b", "secret1", "secret1").validate().is_ok());
    }

    #[test]
    fn email_and_password_rules() {
        let errs = form("taro", "not-an-email", "short", "short").validate().unwrap_err();
        assert!(errs.has("email"));
        assert!(errs.has("password"));
        assert!(!errs.has("password_confirmation"));

        let errs = form("taro", "a@b", "secret1", "secret2").validate().unwrap_err();
        assert!(errs.has("password_confirmation"));
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_email("  Taro@Example.COM "), "taro@example.com");
    }
}
