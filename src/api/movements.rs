//! Movement API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::movement::{CreateMovement, Movement, MovementQuery, UpdateMovement},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List movements, newest first
#[utoipa::path(
    get,
    path = "/movements",
    tag = "movements",
    security(("bearer_auth" = [])),
    params(MovementQuery),
    responses(
        (status = 200, description = "Movements", body = Vec<Movement>)
    )
)]
pub async fn list_movements(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = state.services.movements.list(&query).await?;
    Ok(Json(movements))
}

/// Get a movement by ID
#[utoipa::path(
    get,
    path = "/movements/{id}",
    tag = "movements",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    responses(
        (status = 200, description = "Movement", body = Movement),
        (status = 404, description = "Movement not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_movement(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Movement>> {
    let movement = state.services.movements.get_by_id(id).await?;
    Ok(Json(movement))
}

/// Record a manual stock movement
#[utoipa::path(
    post,
    path = "/movements",
    tag = "movements",
    security(("bearer_auth" = [])),
    request_body = CreateMovement,
    responses(
        (status = 201, description = "Movement recorded", body = Movement),
        (status = 400, description = "Invalid movement or insufficient stock", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_movement(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let movement = state.services.movements.create(&data).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Update a manual movement
#[utoipa::path(
    put,
    path = "/movements/{id}",
    tag = "movements",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    request_body = UpdateMovement,
    responses(
        (status = 200, description = "Movement updated", body = Movement),
        (status = 400, description = "Invalid change or production movement", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_movement(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateMovement>,
) -> AppResult<Json<Movement>> {
    claims.require_admin()?;
    let movement = state.services.movements.update(id, &data).await?;
    Ok(Json(movement))
}

/// Delete a manual movement
#[utoipa::path(
    delete,
    path = "/movements/{id}",
    tag = "movements",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    responses(
        (status = 204, description = "Movement deleted"),
        (status = 400, description = "Production movement", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_movement(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.movements.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
