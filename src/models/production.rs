//! Production record model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Production journal entry
///
/// Employee name and equipment model are snapshots taken when the record
/// was written, so reports stay stable after renames.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub equipment_id: i32,
    pub equipment_model: String,
    pub quantity: i64,
    pub date: NaiveDate,
    /// Reset entries only count toward `totalResets`
    pub is_reset: bool,
    pub timestamp: DateTime<Utc>,
}

/// Create production request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduction {
    pub employee_id: i32,
    pub equipment_id: i32,
    #[validate(range(min = 1, max = 2147483647, message = "Quantity must be between 1 and 2147483647"))]
    pub quantity: i64,
    /// Production day (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub is_reset: bool,
}

/// Update production request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduction {
    pub employee_id: Option<i32>,
    pub equipment_id: Option<i32>,
    #[validate(range(min = 1, max = 2147483647, message = "Quantity must be between 1 and 2147483647"))]
    pub quantity: Option<i64>,
    /// Production day (YYYY-MM-DD)
    pub date: Option<String>,
    pub is_reset: Option<bool>,
}

/// Query parameters for production listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionQuery {
    /// First day included (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Last day included (YYYY-MM-DD)
    pub end_date: Option<String>,
    pub employee_id: Option<i32>,
    pub equipment_id: Option<i32>,
}

/// Validated production filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<i32>,
    pub equipment_id: Option<i32>,
}

/// Fields needed to insert a production row
#[derive(Debug, Clone)]
pub struct NewProduction {
    pub employee_id: i32,
    pub employee_name: String,
    pub equipment_id: i32,
    pub equipment_model: String,
    pub quantity: i64,
    pub date: NaiveDate,
    pub is_reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_beyond_i32_is_rejected() {
        let req = CreateProduction {
            employee_id: 1,
            equipment_id: 1,
            quantity: i64::MAX,
            date: "2025-01-01".to_string(),
            is_reset: false,
        };
        assert!(req.validate().is_err());

        let update = UpdateProduction {
            quantity: Some(2_147_483_648),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateProduction {
            quantity: Some(2_147_483_647),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
