//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{employees, equipment, health, movements, production, reconciliation, separations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mix Production API",
        version = "1.0.0",
        description = "Equipment stock, production journal and MAC separation REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Production
        production::list_production,
        production::get_production,
        production::create_production,
        production::update_production,
        production::delete_production,
        // Movements
        movements::list_movements,
        movements::get_movement,
        movements::create_movement,
        movements::update_movement,
        movements::delete_movement,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Separations
        separations::list_separations_by_date,
        separations::list_recent_separations,
        separations::get_separation,
        separations::create_separation,
        separations::update_separation_status,
        separations::delete_separation,
        // Reconciliation
        reconciliation::get_reconciliation_report,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::StockCounters,
            // Production
            crate::models::production::ProductionRecord,
            crate::models::production::CreateProduction,
            crate::models::production::UpdateProduction,
            // Movements
            crate::models::movement::Movement,
            crate::models::movement::MovementType,
            crate::models::movement::CreateMovement,
            crate::models::movement::UpdateMovement,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            // Separations
            crate::models::separation::MacSeparation,
            crate::models::separation::SeparationStatus,
            crate::models::separation::CreateSeparation,
            crate::models::separation::UpdateSeparationStatus,
            // Reconciliation
            crate::services::reconciliation::ReconciliationReport,
            crate::services::reconciliation::EquipmentReconciliation,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment catalog and stock counters"),
        (name = "production", description = "Production journal"),
        (name = "movements", description = "Stock movement journal"),
        (name = "employees", description = "Employee directory"),
        (name = "separations", description = "MAC separation queue"),
        (name = "reconciliation", description = "Stock reconciliation")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the secured paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
