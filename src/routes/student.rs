use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        auth::AuthenticatedUser,
        ballot::{FeedbackRequest, MonthlyVoteRequest, ReplacementVoteRequest},
        menu::MenuQuery,
        user::UserRole,
    },
    services::{
        ballots::BallotService, errors::ServiceError, menu::MenuService,
        metrics::BALLOTS_COUNTER,
    },
    AppState,
};

fn require_student(user: &AuthenticatedUser) -> Result<(), ServiceError> {
    match user.role {
        UserRole::Student => Ok(()),
        _ => Err(ServiceError::Forbidden),
    }
}

/// POST /student/vote-monthly — exactly 28 items, 7 per category.
pub async fn vote_monthly(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<MonthlyVoteRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    require_student(&user)?;

    BallotService::submit_monthly(&state.db, user.user_id, &body.month, &body.selected_items)
        .await?;
    BALLOTS_COUNTER
        .with_label_values(&["monthly_selection"])
        .inc();
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Vote recorded" })),
    ))
}

/// POST /student/feedback — up to 3 disliked items from the current menu.
pub async fn give_feedback(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    require_student(&user)?;

    BallotService::submit_feedback(
        &state.db,
        user.user_id,
        &body.month,
        body.week,
        &body.disliked_items,
    )
    .await?;
    BALLOTS_COUNTER.with_label_values(&["feedback"]).inc();
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Feedback recorded" })),
    ))
}

/// POST /student/vote-replacement — up to 3 suggested replacements.
pub async fn vote_replacement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<ReplacementVoteRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    require_student(&user)?;

    BallotService::submit_replacement(
        &state.db,
        user.user_id,
        &body.month,
        body.week,
        &body.replacement_items,
    )
    .await?;
    BALLOTS_COUNTER.with_label_values(&["replacement"]).inc();
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Replacement vote recorded" })),
    ))
}

/// GET /student/menu?month=&week= — any authenticated user may read.
pub async fn get_menu(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<MenuQuery>,
) -> Result<Json<Value>, ServiceError> {
    let menu = MenuService::find(&state.db, &params.month, params.week).await?;
    Ok(Json(serde_json::to_value(menu).unwrap()))
}
