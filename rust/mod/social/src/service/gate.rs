use tracing::debug;

use crate::model::Post;
use crate::service::{SocialError, SocialService};

/// What the acting user wants to do with a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Modify or delete: only the author.
    Ownership,
    /// Read the tweet, its likes or replies: only followers of the author.
    Visibility,
}

impl SocialService {
    /// Decide whether `acting_user_id` may perform `access` on `post`.
    ///
    /// A missing post is denied. Visibility is granted through a follow edge
    /// only, so authors see their own tweets here only if they follow themselves.
    pub fn can_access(
        &self,
        acting_user_id: i64,
        post: Option<&Post>,
        access: Access,
    ) -> Result<bool, SocialError> {
        let Some(post) = post else {
            debug!(acting_user_id, ?access, "denied: tweet not found");
            return Ok(false);
        };

        let allowed = match access {
            Access::Ownership => post.author_id == acting_user_id,
            Access::Visibility => self.is_following(acting_user_id, post.author_id)?,
        };

        if !allowed {
            debug!(acting_user_id, tweet_id = post.id, ?access, "denied");
        }
        Ok(allowed)
    }

    /// Load a tweet and check access in one step.
    ///
    /// Not found and not allowed both fail with [`SocialError::Denied`].
    pub fn authorize(
        &self,
        acting_user_id: i64,
        post_id: i64,
        access: Access,
    ) -> Result<Post, SocialError> {
        let post = self.get_post(post_id)?;
        if self.can_access(acting_user_id, post.as_ref(), access)? {
            post.ok_or(SocialError::Denied)
        } else {
            Err(SocialError::Denied)
        }
    }
}
