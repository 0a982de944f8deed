//! Movement API endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::movement::{CreateMovement, Movement, MovementQuery},
};

/// List movements, newest first
#[utoipa::path(
    get,
    path = "/movements",
    tag = "movements",
    params(MovementQuery),
    responses(
        (status = 200, description = "Movement list", body = Vec<Movement>)
    )
)]
pub async fn list_movements(
    State(state): State<crate::AppState>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = state.services.movements.list(query.equipment_id).await?;
    Ok(Json(movements))
}

/// Record a custody movement
#[utoipa::path(
    post,
    path = "/movements",
    tag = "movements",
    request_body = CreateMovement,
    responses(
        (status = 201, description = "Movement recorded", body = Movement),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_movement(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let movement = state.services.movements.record(&data).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
