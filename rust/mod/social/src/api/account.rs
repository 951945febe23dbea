use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use chirp_core::ServiceError;

use crate::api::{route_both, AppState};
use crate::model::{LoginRequest, LoginResponse, RegisterRequest};

pub fn routes() -> Router<AppState> {
    let router = route_both(Router::new(), "/register", post(register));
    route_both(router, "/login", post(login))
}

/// POST /register/
async fn register(
    State(svc): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<&'static str, ServiceError> {
    svc.register(input)?;
    Ok("User created successfully")
}

/// POST /login/
async fn login(
    State(svc): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let resp = svc.login(&input)?;
    Ok(Json(resp))
}
