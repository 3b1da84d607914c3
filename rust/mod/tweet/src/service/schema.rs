use pictweet_sql::SQLStore;

use crate::service::TweetError;

/// Initialize the SQLite schema for tweets and comments.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), TweetError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS tweets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            image TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_tweets_created ON tweets(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_tweets_user ON tweets(user_id)",

        // Comments go with their tweet
        "CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            tweet_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (tweet_id) REFERENCES tweets(id) ON DELETE CASCADE,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_comments_tweet ON comments(tweet_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])?;
    }

    Ok(())
}
