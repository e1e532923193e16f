//! Production API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::production::{CreateProduction, ProductionQuery, ProductionRecord, UpdateProduction},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List production records, newest first
#[utoipa::path(
    get,
    path = "/production",
    tag = "production",
    security(("bearer_auth" = [])),
    params(ProductionQuery),
    responses(
        (status = 200, description = "Production records", body = Vec<ProductionRecord>),
        (status = 400, description = "Malformed date filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_production(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ProductionQuery>,
) -> AppResult<Json<Vec<ProductionRecord>>> {
    let records = state.services.production.list(&query).await?;
    Ok(Json(records))
}

/// Get a production record by ID
#[utoipa::path(
    get,
    path = "/production/{id}",
    tag = "production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    responses(
        (status = 200, description = "Production record", body = ProductionRecord),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_production(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductionRecord>> {
    let record = state.services.production.get_by_id(id).await?;
    Ok(Json(record))
}

/// Record production
///
/// Normal entries raise `currentStock`; reset entries raise `totalResets`.
#[utoipa::path(
    post,
    path = "/production",
    tag = "production",
    security(("bearer_auth" = [])),
    request_body = CreateProduction,
    responses(
        (status = 201, description = "Production recorded", body = ProductionRecord),
        (status = 400, description = "Invalid or duplicate entry", body = crate::error::ErrorResponse),
        (status = 404, description = "Employee or equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_production(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateProduction>,
) -> AppResult<(StatusCode, Json<ProductionRecord>)> {
    let record = state.services.production.create(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a production record
#[utoipa::path(
    put,
    path = "/production/{id}",
    tag = "production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    request_body = UpdateProduction,
    responses(
        (status = 200, description = "Production updated", body = ProductionRecord),
        (status = 400, description = "Invalid or duplicate entry", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_production(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateProduction>,
) -> AppResult<Json<ProductionRecord>> {
    claims.require_admin()?;
    let record = state.services.production.update(id, &data).await?;
    Ok(Json(record))
}

/// Delete a production record
#[utoipa::path(
    delete,
    path = "/production/{id}",
    tag = "production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    responses(
        (status = 204, description = "Production deleted"),
        (status = 403, description = "Administrator role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_production(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.production.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
