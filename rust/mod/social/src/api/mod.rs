mod account;
mod user;
mod tweets;
mod middleware;


use std::sync::Arc;

use axum::routing::MethodRouter;
use axum::Router;

use crate::service::SocialService;

/// Shared application state.
pub type AppState = Arc<SocialService>;

/// Build the complete social API router.
///
/// `/register` and `/login` are public. Every other route sits behind the
/// bearer-token middleware, which makes `Claims` available as an extension.
pub fn build_router(svc: Arc<SocialService>) -> Router {
    let protected = Router::new()
        .merge(user::routes())
        .merge(tweets::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            svc.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(account::routes())
        .merge(protected)
        .with_state(svc)
}

/// Register `path` both with and without a trailing slash.
fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    let bare = path.trim_end_matches('/');
    router
        .route(bare, method_router.clone())
        .route(&format!("{}/", bare), method_router)
}
