use serde::{Deserialize, Serialize};

use pictweet_core::ValidationErrors;

/// Longest tweet text accepted, in characters.
pub const TEXT_MAX_CHARS: usize = 140;

// ---------------------------------------------------------------------------
// Tweet
// ---------------------------------------------------------------------------

/// A posted picture with its caption.
///
/// `user_id` is fixed at creation; only the owner may edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: i64,

    /// Caption, 1..=140 characters.
    pub text: String,

    /// Image URL. Stored as given; never fetched by the server.
    pub image: String,

    /// Owner.
    pub user_id: i64,

    /// Owner's nickname, joined from `users` for display.
    pub nickname: String,

    pub created_at: String,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A reply attached to exactly one tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub tweet_id: i64,

    /// Author.
    pub user_id: i64,

    /// Author's nickname, joined from `users` for display.
    pub nickname: String,

    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Body of `POST /tweets` and `PATCH /tweets/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: String,
}

impl TweetForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if errs.require("text", "Text", &self.text) {
            errs.max_chars("text", "Text", &self.text, TEXT_MAX_CHARS);
        }
        if errs.require("image", "Image", &self.image) && !is_web_url(&self.image) {
            errs.add("image", "Image must be an http(s) URL");
        }
        errs.into_result()
    }
}

/// The image ends up inside a CSS `url('...')`, so besides the scheme
/// it must not carry quotes, parentheses, backslashes or whitespace.
fn is_web_url(image: &str) -> bool {
    let rest = image
        .strip_prefix("https://")
        .or_else(|| image.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            !rest.is_empty()
                && !rest.chars().any(|c| {
                    c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')' | '\\' | '<' | '>')
                })
        }
        None => false,
    }
}

/// Body of `POST /tweets/{id}/comments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require("text", "Text", &self.text);
        errs.into_result()
    }
}

/// Body of `POST /tweets/{id}`: browsers cannot submit PATCH or DELETE,
/// so the edit and delete forms name the verb in a hidden `_method` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodOverrideForm {
    #[serde(rename = "_method", default)]
    pub method: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: String,
}

/// Verb carried by a [`MethodOverrideForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideMethod {
    Patch,
    Delete,
}

impl MethodOverrideForm {
    /// The overridden verb; `None` for anything but `patch` / `delete`.
    pub fn method(&self) -> Option<OverrideMethod> {
        match self.method.trim().to_ascii_lowercase().as_str() {
            "patch" => Some(OverrideMethod::Patch),
            "delete" => Some(OverrideMethod::Delete),
            _ => None,
        }
    }

    pub fn into_tweet_form(self) -> TweetForm {
        TweetForm {
            text: self.text,
            image: self.image,
        }
    }
}
