use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use chirp_core::ServiceError;

use crate::api::{route_both, AppState};
use crate::model::{Claims, CreateTweet, FeedItem, NameEntry, TweetSummary};

pub fn routes() -> Router<AppState> {
    let router = Router::new();
    let router = route_both(router, "/user/tweets/feed", get(feed));
    let router = route_both(router, "/user/following", get(following));
    let router = route_both(router, "/user/followers", get(followers));
    route_both(router, "/user/tweets", get(own_tweets).post(create_tweet))
}

/// GET /user/tweets/feed/ — latest tweets of followed users.
async fn feed(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<FeedItem>>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    Ok(Json(svc.feed(user.id)?))
}

/// GET /user/following/
async fn following(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<NameEntry>>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    Ok(Json(svc.list_following(user.id)?))
}

/// GET /user/followers/
async fn followers(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<NameEntry>>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    Ok(Json(svc.list_followers(user.id)?))
}

/// GET /user/tweets/ — the caller's own tweets with counts.
async fn own_tweets(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<TweetSummary>>, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    Ok(Json(svc.own_posts(user.id)?))
}

/// POST /user/tweets/
async fn create_tweet(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<CreateTweet>,
) -> Result<&'static str, ServiceError> {
    let user = svc.current_user(&claims.username)?;
    svc.create_post(user.id, &input.tweet)?;
    Ok("Created a Tweet")
}
