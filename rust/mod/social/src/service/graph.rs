use chirp_sql::Value;
use tracing::info;

use crate::model::{FollowEdge, NameEntry};
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Whether `follower_id` follows `author_id`. Always read from the store.
    pub fn is_following(&self, follower_id: i64, author_id: i64) -> Result<bool, SocialError> {
        let rows = self.sql.query(
            "SELECT 1 AS hit FROM follower
             WHERE follower_user_id = ?1 AND following_user_id = ?2
             LIMIT 1",
            &[Value::Integer(follower_id), Value::Integer(author_id)],
        )?;
        Ok(!rows.is_empty())
    }

    /// Names of the users `user_id` follows.
    pub fn list_following(&self, user_id: i64) -> Result<Vec<NameEntry>, SocialError> {
        self.names(
            "SELECT u.name AS name
             FROM follower f
             INNER JOIN user u ON u.user_id = f.following_user_id
             WHERE f.follower_user_id = ?1",
            user_id,
        )
    }

    /// Names of the users following `user_id`.
    pub fn list_followers(&self, user_id: i64) -> Result<Vec<NameEntry>, SocialError> {
        self.names(
            "SELECT u.name AS name
             FROM follower f
             INNER JOIN user u ON u.user_id = f.follower_user_id
             WHERE f.following_user_id = ?1",
            user_id,
        )
    }

    fn names(&self, sql: &str, user_id: i64) -> Result<Vec<NameEntry>, SocialError> {
        let rows = self.sql.query(sql, &[Value::Integer(user_id)])?;
        rows.iter()
            .map(|r| -> Result<NameEntry, SocialError> {
                Ok(NameEntry { name: r.require_str("name")? })
            })
            .collect()
    }

    /// Insert a follow edge. Duplicates and self-follows are not rejected.
    pub fn follow(&self, follower_id: i64, following_id: i64) -> Result<FollowEdge, SocialError> {
        self.sql.insert(
            "INSERT INTO follower (follower_user_id, following_user_id) VALUES (?1, ?2)",
            &[Value::Integer(follower_id), Value::Integer(following_id)],
        )?;
        info!(follower_id, following_id, "follow edge added");
        Ok(FollowEdge {
            follower_id,
            following_id,
        })
    }

    /// Remove every edge from `follower_id` to `following_id`. Returns the count removed.
    pub fn unfollow(&self, follower_id: i64, following_id: i64) -> Result<u64, SocialError> {
        let removed = self.sql.exec(
            "DELETE FROM follower WHERE follower_user_id = ?1 AND following_user_id = ?2",
            &[Value::Integer(follower_id), Value::Integer(following_id)],
        )?;
        info!(follower_id, following_id, removed, "follow edge removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::NameEntry;
    use crate::service::test_support::{add_user, test_service};

    fn sorted(mut v: Vec<NameEntry>) -> Vec<String> {
        v.sort();
        v.into_iter().map(|n| n.name).collect()
    }

    #[test]
    fn test_follow_is_directed() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");

        assert!(!svc.is_following(alice.id, bob.id).unwrap());
        let edge = svc.follow(alice.id, bob.id).unwrap();
        assert_eq!(edge.follower_id, alice.id);
        assert_eq!(edge.following_id, bob.id);

        assert!(svc.is_following(alice.id, bob.id).unwrap());
        assert!(!svc.is_following(bob.id, alice.id).unwrap());
    }

    #[test]
    fn test_following_and_followers_lists() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");
        let carol = add_user(&svc, "carol");

        svc.follow(alice.id, bob.id).unwrap();
        svc.follow(alice.id, carol.id).unwrap();
        svc.follow(carol.id, bob.id).unwrap();

        assert_eq!(
            sorted(svc.list_following(alice.id).unwrap()),
            vec!["bob name", "carol name"]
        );
        assert_eq!(
            sorted(svc.list_followers(bob.id).unwrap()),
            vec!["alice name", "carol name"]
        );
        assert!(svc.list_following(bob.id).unwrap().is_empty());
        assert!(svc.list_followers(alice.id).unwrap().is_empty());
    }

    #[test]
    fn test_unfollow_takes_effect_immediately() {
        let svc = test_service();
        let alice = add_user(&svc, "alice");
        let bob = add_user(&svc, "bob");

        svc.follow(alice.id, bob.id).unwrap();
        svc.follow(alice.id, bob.id).unwrap();
        assert_eq!(svc.unfollow(alice.id, bob.id).unwrap(), 2);
        assert!(!svc.is_following(alice.id, bob.id).unwrap());
        assert_eq!(svc.unfollow(alice.id, bob.id).unwrap(), 0);
    }
}
