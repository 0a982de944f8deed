//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{categories, equipment, health, movements, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Materio API",
        version = "1.0.0",
        description = "IT Equipment Inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Materio Team", email = "contact@materio.dev")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Movements
        movements::list_movements,
        movements::create_movement,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            // Movements
            crate::models::movement::Movement,
            crate::models::movement::MovementType,
            crate::models::movement::CreateMovement,
            crate::models::movement::MovementQuery,
            // Stats
            stats::StatsResponse,
            stats::StatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Category registry"),
        (name = "equipment", description = "Equipment ledger"),
        (name = "movements", description = "Custody movement log"),
        (name = "stats", description = "Inventory statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
