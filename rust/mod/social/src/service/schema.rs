use chirp_sql::SQLStore;

use crate::service::SocialError;

/// Initialize the SQLite schema. Idempotent.
///
/// Table and column names follow the existing `twitterClone.db` layout so an
/// already populated database can be served unchanged. Dependents of a tweet
/// carry no ON DELETE CASCADE; `delete_post` removes them explicitly.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), SocialError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS user (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL DEFAULT '',
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            gender TEXT NOT NULL DEFAULT ''
        )",

        // Directed follow edges: follower sees following's tweets.
        "CREATE TABLE IF NOT EXISTS follower (
            follower_id INTEGER PRIMARY KEY AUTOINCREMENT,
            follower_user_id INTEGER NOT NULL,
            following_user_id INTEGER NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_follower_follower ON follower(follower_user_id)",
        "CREATE INDEX IF NOT EXISTS idx_follower_following ON follower(following_user_id)",

        "CREATE TABLE IF NOT EXISTS tweet (
            tweet_id INTEGER PRIMARY KEY AUTOINCREMENT,
            tweet TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            date_time TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_tweet_user ON tweet(user_id)",

        // "like" is a keyword, keep it quoted everywhere.
        "CREATE TABLE IF NOT EXISTS \"like\" (
            like_id INTEGER PRIMARY KEY AUTOINCREMENT,
            tweet_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            date_time TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_like_tweet ON \"like\"(tweet_id)",

        "CREATE TABLE IF NOT EXISTS reply (
            reply_id INTEGER PRIMARY KEY AUTOINCREMENT,
            tweet_id INTEGER NOT NULL,
            reply TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            date_time TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_reply_tweet ON reply(tweet_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])?;
    }

    Ok(())
}
