use axum::extract::{Extension, Path, State};
use axum::routing::get;
use axum::{Json, Router};

use chirp_core::ServiceError;

use crate::api::{route_both, AppState};
use crate::model::{Claims, LikesView, RepliesView, TweetSummary};
use crate::service::{Access, SocialError};

pub fn routes() -> Router<AppState> {
    let router = Router::new();
    let router = route_both(router, "/tweets/{id}", get(get_tweet).delete(delete_tweet));
    let router = route_both(router, "/tweets/{id}/likes", get(tweet_likes));
    route_both(router, "/tweets/{id}/replies", get(tweet_replies))
}

/// Ids that do not parse cannot name a tweet, so they are denied like one.
fn parse_post_id(raw: &str) -> Result<i64, SocialError> {
    raw.parse::<i64>().map_err(|_| SocialError::Denied)
}

/// GET /tweets/{id}/
async fn get_tweet(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<TweetSummary>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    let post = svc.authorize(user.id, parse_post_id(&id)?, Access::Visibility)?;
    Ok(Json(svc.summarize(&post)?))
}

/// GET /tweets/{id}/likes/
async fn tweet_likes(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<LikesView>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    let post = svc.authorize(user.id, parse_post_id(&id)?, Access::Visibility)?;
    Ok(Json(LikesView {
        likes: svc.likes_of(post.id)?,
    }))
}

/// GET /tweets/{id}/replies/
async fn tweet_replies(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<RepliesView>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    let post = svc.authorize(user.id, parse_post_id(&id)?, Access::Visibility)?;
    Ok(Json(RepliesView {
        replies: svc.replies_of(post.id)?,
    }))
}

/// DELETE /tweets/{id}/ — author only.
async fn delete_tweet(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<&'static str, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    let post = svc.authorize(user.id, parse_post_id(&id)?, Access::Ownership)?;
    svc.delete_post(post.id)?;
    Ok("Tweet Removed")
}
