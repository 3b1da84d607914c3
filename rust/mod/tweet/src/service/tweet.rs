use pictweet_core::{Identity, now_rfc3339};
use pictweet_sql::{Row, SQLError, Value};

use crate::model::{Tweet, TweetForm};
use crate::service::{TweetError, TweetService};

/// Tweet columns joined with the owner's nickname.
pub(crate) const TWEET_SELECT: &str = "SELECT t.id AS id, t.text AS text, t.image AS image,
        t.user_id AS user_id, u.nickname AS nickname,
        t.created_at AS created_at, t.updated_at AS updated_at
    FROM tweets t JOIN users u ON u.id = t.user_id";

/// Most recent first; ties (same microsecond) fall back to insertion order.
pub(crate) const NEWEST_FIRST: &str = "ORDER BY t.created_at DESC, t.id DESC";

impl TryFrom<&Row> for Tweet {
    type Error = SQLError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Tweet {
            id: row.int("id")?,
            text: row.text("text")?,
            image: row.text("image")?,
            user_id: row.int("user_id")?,
            nickname: row.text("nickname")?,
            created_at: row.text("created_at")?,
            updated_at: row.text("updated_at")?,
        })
    }
}

pub(crate) fn rows_to_tweets(rows: &[Row]) -> Result<Vec<Tweet>, TweetError> {
    rows.iter()
        .map(|row| Tweet::try_from(row).map_err(TweetError::from))
        .collect()
}

impl TweetService {
    /// All tweets, most recent first.
    pub fn list_tweets(&self) -> Result<Vec<Tweet>, TweetError> {
        let rows = self
            .sql
            .query(&format!("{} {}", TWEET_SELECT, NEWEST_FIRST), &[])?;
        rows_to_tweets(&rows)
    }

    /// One user's tweets, most recent first.
    pub fn list_tweets_by_user(&self, user_id: i64) -> Result<Vec<Tweet>, TweetError> {
        let rows = self.sql.query(
            &format!("{} WHERE t.user_id = ?1 {}", TWEET_SELECT, NEWEST_FIRST),
            &[Value::Integer(user_id)],
        )?;
        rows_to_tweets(&rows)
    }

    pub fn count_tweets(&self) -> Result<i64, TweetError> {
        let row = self
            .sql
            .query_one("SELECT COUNT(*) AS n FROM tweets", &[])?
            .ok_or_else(|| TweetError::Internal("count returned no row".into()))?;
        Ok(row.int("n")?)
    }

    /// Get a tweet by id.
    pub fn get_tweet(&self, id: i64) -> Result<Tweet, TweetError> {
        let row = self
            .sql
            .query_one(
                &format!("{} WHERE t.id = ?1", TWEET_SELECT),
                &[Value::Integer(id)],
            )?
            .ok_or_else(|| TweetError::NotFound(format!("tweet {}", id)))?;
        Ok(Tweet::try_from(&row)?)
    }

    /// Get a tweet the caller is allowed to change.
    pub fn get_owned_tweet(&self, owner: &Identity, id: i64) -> Result<Tweet, TweetError> {
        let tweet = self.get_tweet(id)?;
        if tweet.user_id != owner.user_id {
            tracing::warn!(
                user_id = owner.user_id,
                tweet_id = id,
                "refusing access to another user's tweet"
            );
            return Err(TweetError::Forbidden(format!("tweet {} belongs to another user", id)));
        }
        Ok(tweet)
    }

    /// Post a new tweet owned by `owner`.
    pub fn create_tweet(&self, owner: &Identity, form: TweetForm) -> Result<Tweet, TweetError> {
        form.validate().map_err(TweetError::Invalid)?;

        let now = now_rfc3339();
        let row = self
            .sql
            .query_one(
                "INSERT INTO tweets (text, image, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4) RETURNING id",
                &[
                    Value::Text(form.text.clone()),
                    Value::Text(form.image.clone()),
                    Value::Integer(owner.user_id),
                    Value::Text(now.clone()),
                ],
            )?
            .ok_or_else(|| TweetError::Internal("insert returned no id".into()))?;

        let tweet = Tweet {
            id: row.int("id")?,
            text: form.text,
            image: form.image,
            user_id: owner.user_id,
            nickname: owner.nickname.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        tracing::info!(tweet_id = tweet.id, user_id = owner.user_id, "tweet created");
        Ok(tweet)
    }

    /// Replace text and image of the caller's own tweet.
    pub fn update_tweet(
        &self,
        owner: &Identity,
        id: i64,
        form: TweetForm,
    ) -> Result<Tweet, TweetError> {
        let mut tweet = self.get_owned_tweet(owner, id)?;
        form.validate().map_err(TweetError::Invalid)?;

        let now = now_rfc3339();
        self.sql.exec(
            "UPDATE tweets SET text = ?1, image = ?2, updated_at = ?3 WHERE id = ?4",
            &[
                Value::Text(form.text.clone()),
                Value::Text(form.image.clone()),
                Value::Text(now.clone()),
                Value::Integer(id),
            ],
        )?;

        tweet.text = form.text;
        tweet.image = form.image;
        tweet.updated_at = now;
        tracing::info!(tweet_id = id, "tweet updated");
        Ok(tweet)
    }

    /// Delete the caller's own tweet together with its comments.
    pub fn destroy_tweet(&self, owner: &Identity, id: i64) -> Result<(), TweetError> {
        self.get_owned_tweet(owner, id)?;
        let affected = self
            .sql
            .exec("DELETE FROM tweets WHERE id = ?1", &[Value::Integer(id)])?;
        if affected == 0 {
            return Err(TweetError::NotFound(format!("tweet {}", id)));
        }
        tracing::info!(tweet_id = id, "tweet deleted");
        Ok(())
    }

    /// Nickname of a registered user, for the profile page header.
    pub fn author_nickname(&self, user_id: i64) -> Result<String, TweetError> {
        let row = self
            .sql
            .query_one(
                "SELECT nickname FROM users WHERE id = ?1",
                &[Value::Integer(user_id)],
            )?
            .ok_or_else(|| TweetError::NotFound(format!("user {}", user_id)))?;
        Ok(row.text("nickname")?)
    }
}
