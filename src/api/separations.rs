//! MAC separation queue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::separation::{CreateSeparation, MacSeparation, SeparationQuery, UpdateSeparationStatus},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List the separations of one day
#[utoipa::path(
    get,
    path = "/separacao-macs",
    tag = "separations",
    security(("bearer_auth" = [])),
    params(SeparationQuery),
    responses(
        (status = 200, description = "Separations of the day", body = Vec<MacSeparation>),
        (status = 400, description = "Missing or malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_separations_by_date(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<SeparationQuery>,
) -> AppResult<Json<Vec<MacSeparation>>> {
    let separations = state
        .services
        .separations
        .list_by_date(query.date.as_deref())
        .await?;
    Ok(Json(separations))
}

/// Latest separations across all days
#[utoipa::path(
    get,
    path = "/separacao-macs/all",
    tag = "separations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Latest separations", body = Vec<MacSeparation>)
    )
)]
pub async fn list_recent_separations(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MacSeparation>>> {
    Ok(Json(state.services.separations.list_recent().await?))
}

#[utoipa::path(
    get,
    path = "/separacao-macs/{id}",
    tag = "separations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Separation ID")),
    responses(
        (status = 200, description = "Separation", body = MacSeparation),
        (status = 404, description = "Separation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_separation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MacSeparation>> {
    Ok(Json(state.services.separations.get_by_id(id).await?))
}

#[utoipa::path(
    post,
    path = "/separacao-macs",
    tag = "separations",
    security(("bearer_auth" = [])),
    request_body = CreateSeparation,
    responses(
        (status = 201, description = "Separation queued", body = MacSeparation),
        (status = 404, description = "Employee or equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_separation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateSeparation>,
) -> AppResult<(StatusCode, Json<MacSeparation>)> {
    let separation = state.services.separations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(separation)))
}

/// Move a separation through its workflow
#[utoipa::path(
    patch,
    path = "/separacao-macs/{id}",
    tag = "separations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Separation ID")),
    request_body = UpdateSeparationStatus,
    responses(
        (status = 200, description = "Status changed", body = MacSeparation),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
        (status = 404, description = "Separation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_separation_status(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateSeparationStatus>,
) -> AppResult<Json<MacSeparation>> {
    let separation = state
        .services
        .separations
        .update_status(id, &data.status)
        .await?;
    Ok(Json(separation))
}

#[utoipa::path(
    delete,
    path = "/separacao-macs/{id}",
    tag = "separations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Separation ID")),
    responses(
        (status = 204, description = "Separation removed"),
        (status = 404, description = "Separation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_separation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.separations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
