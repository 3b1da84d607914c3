use pictweet_core::{Identity, now_rfc3339};
use pictweet_sql::{Row, SQLError, Value};

use crate::model::{Comment, CommentForm};
use crate::service::{TweetError, TweetService};

impl TryFrom<&Row> for Comment {
    type Error = SQLError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: row.int("id")?,
            text: row.text("text")?,
            tweet_id: row.int("tweet_id")?,
            user_id: row.int("user_id")?,
            nickname: row.text("nickname")?,
            created_at: row.text("created_at")?,
        })
    }
}

impl TweetService {
    /// Comment on a tweet as `author`.
    pub fn create_comment(
        &self,
        author: &Identity,
        tweet_id: i64,
        form: CommentForm,
    ) -> Result<Comment, TweetError> {
        self.get_tweet(tweet_id)?;
        form.validate().map_err(TweetError::Invalid)?;

        let now = now_rfc3339();
        let row = self
            .sql
            .query_one(
                "INSERT INTO comments (text, tweet_id, user_id, created_at)
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                &[
                    Value::Text(form.text.clone()),
                    Value::Integer(tweet_id),
                    Value::Integer(author.user_id),
                    Value::Text(now.clone()),
                ],
            )?
            .ok_or_else(|| TweetError::Internal("insert returned no id".into()))?;

        let comment = Comment {
            id: row.int("id")?,
            text: form.text,
            tweet_id,
            user_id: author.user_id,
            nickname: author.nickname.clone(),
            created_at: now,
        };
        tracing::info!(comment_id = comment.id, tweet_id, "comment created");
        Ok(comment)
    }

    /// Comments on a tweet in the order they were written.
    pub fn list_comments(&self, tweet_id: i64) -> Result<Vec<Comment>, TweetError> {
        let rows = self.sql.query(
            "SELECT c.id AS id, c.text AS text, c.tweet_id AS tweet_id,
                    c.user_id AS user_id, u.nickname AS nickname, c.created_at AS created_at
             FROM comments c JOIN users u ON u.id = c.user_id
             WHERE c.tweet_id = ?1
             ORDER BY c.created_at ASC, c.id ASC",
            &[Value::Integer(tweet_id)],
        )?;
        rows.iter()
            .map(|row| Comment::try_from(row).map_err(TweetError::from))
            .collect()
    }
}
