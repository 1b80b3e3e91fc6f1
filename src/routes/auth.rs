use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::{
    models::{
        auth::AuthenticatedUser,
        user::{LoginRequest, RegisterRequest},
    },
    services::{auth::AuthService, errors::ServiceError, metrics::LOGINS_COUNTER},
    AppState,
};

/// POST /auth/register — open registration, defaults to the student role.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let profile = AuthService::register(&state.db, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(profile).unwrap()),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ServiceError> {
    match AuthService::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_expiry_seconds,
    )
    .await
    {
        Ok(response) => {
            LOGINS_COUNTER.with_label_values(&["success"]).inc();
            Ok(Json(serde_json::to_value(response).unwrap()))
        }
        Err(e) => {
            LOGINS_COUNTER.with_label_values(&["failure"]).inc();
            Err(e)
        }
    }
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, ServiceError> {
    let profile = AuthService::profile(&state.db, user.user_id).await?;
    Ok(Json(serde_json::to_value(profile).unwrap()))
}
