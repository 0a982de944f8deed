//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Inventory statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Total number of equipment items
    pub total_equipment: i64,
    /// Items currently in storage
    pub in_storage: i64,
    /// Items currently checked out
    pub in_use: i64,
    /// Items flagged faulty
    pub faulty: i64,
    /// Equipment count per category present in the ledger
    pub by_category: Vec<StatEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// Get inventory statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Inventory statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
