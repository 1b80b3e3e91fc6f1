use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        auth::AuthenticatedUser,
        ballot::MonthQuery,
        food_item::CreateFoodItemRequest,
        menu::{LockMenuRequest, MenuQuery},
        user::UserRole,
    },
    services::{
        aggregation::AggregationService,
        ballots::BallotService,
        catalog::CatalogService,
        errors::ServiceError,
        menu::MenuService,
        metrics::{GENERATIONS_COUNTER, MENUS_LOCKED_COUNTER},
    },
    AppState,
};

fn require_admin(user: &AuthenticatedUser) -> Result<(), ServiceError> {
    match user.role {
        UserRole::Admin => Ok(()),
        _ => Err(ServiceError::Forbidden),
    }
}

/// POST /admin/food-item
pub async fn add_food_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateFoodItemRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    require_admin(&user)?;

    let item = CatalogService::create(&state.db, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(item).unwrap()),
    ))
}

/// GET /admin/food-items
pub async fn list_food_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, ServiceError> {
    require_admin(&user)?;

    let items = CatalogService::list(&state.db).await?;
    Ok(Json(serde_json::to_value(items).unwrap()))
}

/// POST /admin/menu — lock an approved 28-item list for a period.
pub async fn lock_menu(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<LockMenuRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    require_admin(&user)?;

    let menu = MenuService::lock(&state.db, &body.month, body.week, &body.items).await?;
    MENUS_LOCKED_COUNTER.inc();
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Monthly menu locked", "menu": menu })),
    ))
}

/// GET /admin/votes?month= — raw ballots for the period.
pub async fn get_votes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Value>, ServiceError> {
    require_admin(&user)?;

    let ballots = BallotService::list_for_month(&state.db, &params.month).await?;
    Ok(Json(serde_json::to_value(ballots).unwrap()))
}

/// GET /admin/generate-monthly?month= — ranked 7-day proposal, nothing persisted.
pub async fn generate_monthly(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Value>, ServiceError> {
    require_admin(&user)?;

    let proposal = AggregationService::generate_monthly(&state.db, &params.month).await?;
    GENERATIONS_COUNTER.with_label_values(&["monthly"]).inc();
    Ok(Json(serde_json::to_value(proposal).unwrap()))
}

/// GET /admin/generate-weekly?month=&week= — top disliked and replacements.
pub async fn generate_weekly(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<MenuQuery>,
) -> Result<Json<Value>, ServiceError> {
    require_admin(&user)?;

    let proposal =
        AggregationService::generate_weekly(&state.db, &params.month, params.week).await?;
    GENERATIONS_COUNTER.with_label_values(&["weekly"]).inc();
    Ok(Json(serde_json::to_value(proposal).unwrap()))
}
