//! Employee model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Shop-floor employee referenced by production entries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub department: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Employee name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub active: Option<bool>,
}

/// Update employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "Employee name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department: Option<String>,
    pub active: Option<bool>,
}
