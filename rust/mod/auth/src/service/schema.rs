use pictweet_sql::SQLStore;

use crate::service::AuthError;

/// Initialize the SQLite schema for accounts and sessions.
///
/// Must run before any module whose tables reference `users`.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), AuthError> {
    let statements = [
        // Users table: login identity
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nickname TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",

        // Sessions table: issued session tokens
        "CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            revoked INTEGER NOT NULL DEFAULT 0,
            issued_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])?;
    }

    Ok(())
}
