//! Stock reconciliation report endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::reconciliation::ReconciliationReport,
    AppState,
};

use super::AuthenticatedUser;

/// Compare stored counters with the journals, without writing anything
///
/// Repairs are done offline with the `reconcile` binary.
#[utoipa::path(
    get,
    path = "/reconciliation",
    tag = "reconciliation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reconciliation report", body = ReconciliationReport),
        (status = 403, description = "Administrator role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reconciliation_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ReconciliationReport>> {
    claims.require_admin()?;
    let report = state.services.reconciliation.verify().await?;
    Ok(Json(report))
}
