//! Route registration: system endpoints plus every module's routes.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::info;

use chirp_core::Module;

/// Build the complete router.
///
/// Module routers carry their own state and middleware, so they are merged
/// as-is at the root.
pub fn build_router(modules: &[&dyn Module]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        info!("Mounting {} routes", module.name());
        app = app.merge(module.routes());
    }

    app
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "chirpd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use chirp_sql::{SQLStore, SqliteStore};
    use social::service::SocialConfig;
    use social::SocialModule;

    use super::*;

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn app() -> Router {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let module = SocialModule::new(sql, SocialConfig::default()).unwrap();
        build_router(&[&module])
    }

    #[tokio::test]
    async fn test_system_endpoints_are_public() {
        let app = app();

        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));

        let (status, body) = get_json(&app, "/version").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "chirpd");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_module_routes_mounted() {
        let app = app();

        let (status, body) = get_json(&app, "/user/tweets/feed/").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid JWT Token");

        let (status, _) = get_json(&app, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
