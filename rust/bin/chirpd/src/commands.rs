//! Operator subcommands that edit the follow graph by username.

use social::model::{FollowEdge, User};
use social::service::SocialService;

fn resolve(svc: &SocialService, username: &str) -> anyhow::Result<User> {
    svc.get_user_by_username(username)?
        .ok_or_else(|| anyhow::anyhow!("no such user: {}", username))
}

/// Make `follower` follow `following`.
pub fn follow(svc: &SocialService, follower: &str, following: &str) -> anyhow::Result<FollowEdge> {
    let a = resolve(svc, follower)?;
    let b = resolve(svc, following)?;
    if svc.is_following(a.id, b.id)? {
        anyhow::bail!("{} already follows {}", follower, following);
    }
    Ok(svc.follow(a.id, b.id)?)
}

/// Remove every edge from `follower` to `following`. Returns how many were removed.
pub fn unfollow(svc: &SocialService, follower: &str, following: &str) -> anyhow::Result<u64> {
    let a = resolve(svc, follower)?;
    let b = resolve(svc, following)?;
    Ok(svc.unfollow(a.id, b.id)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chirp_sql::{SQLStore, SqliteStore};
    use social::model::RegisterRequest;
    use social::service::SocialConfig;

    use super::*;

    fn service_with(users: &[&str]) -> Arc<SocialService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let svc = SocialService::new(sql, SocialConfig::default()).unwrap();
        for u in users {
            svc.register(RegisterRequest {
                username: u.to_string(),
                password: "secret1".into(),
                name: u.to_uppercase(),
                gender: String::new(),
            })
            .unwrap();
        }
        svc
    }

    #[test]
    fn test_follow_and_unfollow_by_username() {
        let svc = service_with(&["alice", "bob"]);

        let edge = follow(&svc, "alice", "bob").unwrap();
        let alice = svc.get_user_by_username("alice").unwrap().unwrap();
        let bob = svc.get_user_by_username("bob").unwrap().unwrap();
        assert_eq!(edge.follower_id, alice.id);
        assert_eq!(edge.following_id, bob.id);
        assert!(svc.is_following(alice.id, bob.id).unwrap());

        assert!(follow(&svc, "alice", "bob").is_err());

        assert_eq!(unfollow(&svc, "alice", "bob").unwrap(), 1);
        assert!(!svc.is_following(alice.id, bob.id).unwrap());
        assert_eq!(unfollow(&svc, "alice", "bob").unwrap(), 0);
    }

    #[test]
    fn test_unknown_user_rejected() {
        let svc = service_with(&["alice"]);
        assert!(follow(&svc, "alice", "nobody").is_err());
        assert!(unfollow(&svc, "nobody", "alice").is_err());
    }
}
