use chirp_sql::{Row, Value};
use tracing::info;

use crate::model::{FeedItem, Post, ReplyEntry, TweetSummary};
use crate::service::{SocialError, SocialService};

fn post_from_row(row: &Row) -> Result<Post, SocialError> {
    Ok(Post {
        id: row.require_i64("tweet_id")?,
        author_id: row.require_i64("user_id")?,
        body: row.require_str("tweet")?,
        created_at: row.require_str("date_time")?,
    })
}

impl SocialService {
    /// Create a tweet. The timestamp is assigned by the store.
    pub fn create_post(&self, author_id: i64, body: &str) -> Result<Post, SocialError> {
        let id = self.sql.insert(
            "INSERT INTO tweet (tweet, user_id, date_time) VALUES (?1, ?2, datetime('now'))",
            &[Value::Text(body.to_string()), Value::Integer(author_id)],
        )?;
        info!(tweet_id = id, author_id, "tweet created");

        self.get_post(id)?
            .ok_or_else(|| SocialError::Internal(format!("tweet {} vanished after insert", id)))
    }

    /// Get a tweet by id.
    pub fn get_post(&self, post_id: i64) -> Result<Option<Post>, SocialError> {
        let rows = self.sql.query(
            "SELECT tweet_id, tweet, user_id, date_time FROM tweet WHERE tweet_id = ?1",
            &[Value::Integer(post_id)],
        )?;
        rows.first().map(post_from_row).transpose()
    }

    /// Home feed with the configured limit.
    pub fn feed(&self, user_id: i64) -> Result<Vec<FeedItem>, SocialError> {
        self.feed_for(user_id, self.config.feed_limit)
    }

    /// Latest tweets by users `user_id` follows, newest first.
    ///
    /// Tweets sharing a timestamp are ordered by id, newest first.
    pub fn feed_for(&self, user_id: i64, limit: usize) -> Result<Vec<FeedItem>, SocialError> {
        let rows = self.sql.query(
            "SELECT u.username AS username, t.tweet AS tweet, t.date_time AS date_time
             FROM tweet t
             INNER JOIN user u ON t.user_id = u.user_id
             WHERE t.user_id IN (
                 SELECT following_user_id FROM follower WHERE follower_user_id = ?1
             )
             ORDER BY t.date_time DESC, t.tweet_id DESC
             LIMIT ?2",
            &[Value::Integer(user_id), Value::Integer(limit as i64)],
        )?;

        rows.iter()
            .map(|r| -> Result<FeedItem, SocialError> {
                Ok(FeedItem {
                    username: r.require_str("username")?,
                    tweet: r.require_str("tweet")?,
                    date_time: r.require_str("date_time")?,
                })
            })
            .collect()
    }

    /// All tweets of `user_id` with like/reply counts, newest first.
    pub fn own_posts(&self, user_id: i64) -> Result<Vec<TweetSummary>, SocialError> {
        let rows = self.sql.query(
            "SELECT
                t.tweet AS tweet,
                COUNT(DISTINCT l.like_id) AS likes,
                COUNT(DISTINCT r.reply_id) AS replies,
                t.date_time AS date_time
             FROM tweet t
             LEFT JOIN \"like\" l ON t.tweet_id = l.tweet_id
             LEFT JOIN reply r ON t.tweet_id = r.tweet_id
             WHERE t.user_id = ?1
             GROUP BY t.tweet_id
             ORDER BY t.date_time DESC, t.tweet_id DESC",
            &[Value::Integer(user_id)],
        )?;

        rows.iter()
            .map(|r| -> Result<TweetSummary, SocialError> {
                Ok(TweetSummary {
                    tweet: r.require_str("tweet")?,
                    likes: r.require_i64("likes")?,
                    replies: r.require_i64("replies")?,
                    date_time: r.require_str("date_time")?,
                })
            })
            .collect()
    }

    /// Current (likes, replies) counts of a tweet.
    pub fn post_counts(&self, post_id: i64) -> Result<(i64, i64), SocialError> {
        let rows = self.sql.query(
            "SELECT
                (SELECT COUNT(*) FROM \"like\" WHERE tweet_id = ?1) AS likes,
                (SELECT COUNT(*) FROM reply WHERE tweet_id = ?1) AS replies",
            &[Value::Integer(post_id)],
        )?;
        let row = rows
            .first()
            .ok_or_else(|| SocialError::Internal("count query returned no rows".into()))?;
        Ok((row.require_i64("likes")?, row.require_i64("replies")?))
    }

    /// A tweet together with its counts.
    pub fn summarize(&self, post: &Post) -> Result<TweetSummary, SocialError> {
        let (likes, replies) = self.post_counts(post.id)?;
        Ok(TweetSummary {
            tweet: post.body.clone(),
            likes,
            replies,
            date_time: post.created_at.clone(),
        })
    }

    /// Usernames of everyone who liked the tweet.
    pub fn likes_of(&self, post_id: i64) -> Result<Vec<String>, SocialError> {
        let rows = self.sql.query(
            "SELECT u.username AS username
             FROM \"like\" l
             INNER JOIN user u ON l.user_id = u.user_id
             WHERE l.tweet_id = ?1",
            &[Value::Integer(post_id)],
        )?;
        rows.iter()
            .map(|r| r.require_str("username").map_err(SocialError::from))
            .collect()
    }

    /// Replies to the tweet, labelled with the replier's display name.
    pub fn replies_of(&self, post_id: i64) -> Result<Vec<ReplyEntry>, SocialError> {
        let rows = self.sql.query(
            "SELECT u.name AS name, r.reply AS reply
             FROM reply r
             INNER JOIN user u ON r.user_id = u.user_id
             WHERE r.tweet_id = ?1",
            &[Value::Integer(post_id)],
        )?;
        rows.iter()
            .map(|r| -> Result<ReplyEntry, SocialError> {
                Ok(ReplyEntry {
                    name: r.require_str("name")?,
                    reply: r.require_str("reply")?,
                })
            })
            .collect()
    }

    /// Record a like. Repeated likes by the same user are not collapsed.
    pub fn like_post(&self, post_id: i64, user_id: i64) -> Result<i64, SocialError> {
        let id = self.sql.insert(
            "INSERT INTO \"like\" (tweet_id, user_id, date_time) VALUES (?1, ?2, datetime('now'))",
            &[Value::Integer(post_id), Value::Integer(user_id)],
        )?;
        Ok(id)
    }

    /// Record a reply.
    pub fn reply_to(&self, post_id: i64, user_id: i64, body: &str) -> Result<i64, SocialError> {
        let id = self.sql.insert(
            "INSERT INTO reply (tweet_id, reply, user_id, date_time) VALUES (?1, ?2, ?3, datetime('now'))",
            &[
                Value::Integer(post_id),
                Value::Text(body.to_string()),
                Value::Integer(user_id),
            ],
        )?;
        Ok(id)
    }

    /// Delete a tweet together with its likes and replies.
    ///
    /// Returns whether the tweet row existed. Ownership is checked by the caller.
    pub fn delete_post(&self, post_id: i64) -> Result<bool, SocialError> {
        let id = [Value::Integer(post_id)];
        let likes = self.sql.exec("DELETE FROM \"like\" WHERE tweet_id = ?1", &id)?;
        let replies = self.sql.exec("DELETE FROM reply WHERE tweet_id = ?1", &id)?;
        let removed = self.sql.exec("DELETE FROM tweet WHERE tweet_id = ?1", &id)?;

        info!(tweet_id = post_id, likes, replies, "tweet deleted");
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::service::test_support::{add_tweet_at, add_user, test_service};

    #[test]
    fn test_create_and_get_post() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");

        let post = svc.create_post(alice.id, "hello").unwrap();
        assert_eq!(post.author_id, alice.id);
        assert_eq!(post.body, "hello");
        // SQLite datetime('now'): YYYY-MM-DD HH:MM:SS
        assert_eq!(post.created_at.len(), 19);

        assert_eq!(svc.get_post(post.id).unwrap(), Some(post));
        assert_eq!(svc.get_post(9999).unwrap(), None);
    }

    #[test]
    fn test_feed_limit_and_order() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        let carol = add_user(&svc, "carol");
        svc.follow(alice.id, bob.id).unwrap();
        svc.follow(alice.id, carol.id).unwrap();

        add_tweet_at(&svc, bob.id, "b1", "2021-04-01 10:00:00");
        add_tweet_at(&svc, carol.id, "c1", "2021-04-03 10:00:00");
        add_tweet_at(&svc, bob.id, "b2", "2021-04-05 10:00:00");
        add_tweet_at(&svc, carol.id, "c2", "2021-04-02 10:00:00");
        add_tweet_at(&svc, bob.id, "b3", "2021-04-04 10:00:00");
        add_tweet_at(&svc, alice.id, "own", "2021-04-06 10:00:00");

        let feed = svc.feed(alice.id).unwrap();
        let bodies: Vec<&str> = feed.iter().map(|f| f.tweet.as_str()).collect();
        assert_eq!(bodies, vec!["b2", "b3", "c1", "c2"]);
        assert_eq!(feed[0].username, "bob");
        assert_eq!(feed[0].date_time, "2021-04-05 10:00:00");
        assert!(feed.windows(2).all(|w| w[0].date_time >= w[1].date_time));

        assert_eq!(svc.feed_for(alice.id, 2).unwrap().len(), 2);
        assert!(svc.feed(bob.id).unwrap().is_empty());
    }

    #[test]
    fn test_feed_same_timestamp_newest_id_first() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        svc.follow(alice.id, bob.id).unwrap();
        // Duplicate edge must not duplicate feed rows.
        svc.follow(alice.id, bob.id).unwrap();

        add_tweet_at(&svc, bob.id, "first", "2021-04-01 10:00:00");
        add_tweet_at(&svc, bob.id, "second", "2021-04-01 10:00:00");

        let feed = svc.feed(alice.id).unwrap();
        let bodies: Vec<&str> = feed.iter().map(|f| f.tweet.as_str()).collect();
        assert_eq!(bodies, vec!["second", "first"]);
    }

    #[test]
    fn test_own_posts_counts() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        let carol = add_user(&svc, "carol");

        let older = add_tweet_at(&svc, alice.id, "older", "2021-04-01 10:00:00");
        let newer = add_tweet_at(&svc, alice.id, "newer", "2021-04-02 10:00:00");
        add_tweet_at(&svc, bob.id, "not mine", "2021-04-03 10:00:00");

        svc.like_post(older, bob.id).unwrap();
        svc.like_post(older, carol.id).unwrap();
        svc.reply_to(older, bob.id, "nice").unwrap();
        svc.reply_to(older, carol.id, "agreed").unwrap();
        svc.reply_to(older, carol.id, "again").unwrap();
        svc.like_post(newer, bob.id).unwrap();

        let posts = svc.own_posts(alice.id).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].tweet, "newer");
        assert_eq!((posts[0].likes, posts[0].replies), (1, 0));
        assert_eq!(posts[1].tweet, "older");
        assert_eq!((posts[1].likes, posts[1].replies), (2, 3));

        assert_eq!(svc.post_counts(older).unwrap(), (2, 3));
    }

    #[test]
    fn test_likes_and_replies_lists() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        let post = svc.create_post(alice.id, "hello").unwrap();

        svc.like_post(post.id, bob.id).unwrap();
        svc.reply_to(post.id, bob.id, "hi alice").unwrap();

        assert_eq!(svc.likes_of(post.id).unwrap(), vec!["bob".to_string()]);
        let replies = svc.replies_of(post.id).unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].name, "bob name");
        assert_eq!(replies[0].reply, "hi alice");
    }

    #[test]
    fn test_delete_removes_dependents() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        let doomed = svc.create_post(alice.id, "doomed").unwrap();
        let kept = svc.create_post(alice.id, "kept").unwrap();

        svc.like_post(doomed.id, bob.id).unwrap();
        svc.reply_to(doomed.id, bob.id, "bye").unwrap();
        svc.like_post(kept.id, bob.id).unwrap();

        assert!(svc.delete_post(doomed.id).unwrap());
        assert_eq!(svc.get_post(doomed.id).unwrap(), None);
        assert!(svc.likes_of(doomed.id).unwrap().is_empty());
        assert!(svc.replies_of(doomed.id).unwrap().is_empty());
        assert_eq!(svc.post_counts(doomed.id).unwrap(), (0, 0));

        assert_eq!(svc.post_counts(kept.id).unwrap(), (1, 0));
        assert!(!svc.delete_post(doomed.id).unwrap());
    }
}
