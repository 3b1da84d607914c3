use pictweet_sql::Value;

use crate::model::Tweet;
use crate::service::tweet::{NEWEST_FIRST, TWEET_SELECT, rows_to_tweets};
use crate::service::{TweetError, TweetService};

impl TweetService {
    /// Tweets whose text or image URL contains `keyword`.
    ///
    /// Matching is a case-sensitive literal substring test; `%` and `_`
    /// have no special meaning. A missing or blank keyword matches
    /// everything. Results are newest first, each tweet once.
    pub fn search_tweets(&self, keyword: Option<&str>) -> Result<Vec<Tweet>, TweetError> {
        let keyword = match keyword {
            Some(k) if !k.trim().is_empty() => k,
            _ => return self.list_tweets(),
        };

        let rows = self.sql.query(
            &format!(
                "{} WHERE instr(t.text, ?1) > 0 OR instr(t.image, ?1) > 0 {}",
                TWEET_SELECT, NEWEST_FIRST
            ),
            &[Value::Text(keyword.to_string())],
        )?;
        let tweets = rows_to_tweets(&rows)?;
        tracing::debug!(hits = tweets.len(), "searched tweets");
        Ok(tweets)
    }
}
