//! Stock movement model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::equipment::CounterDelta;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MovementType {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "saida")]
    Outbound,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "entrada",
            MovementType::Outbound => "saida",
        }
    }

    /// Effect of `quantity` units moving in this direction on `currentStock`
    pub fn stock_delta(&self, quantity: i64) -> CounterDelta {
        match self {
            MovementType::Inbound => CounterDelta::stock(quantity),
            MovementType::Outbound => CounterDelta::stock(-quantity),
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(MovementType::Inbound),
            "saida" => Ok(MovementType::Outbound),
            _ => Err(format!("Invalid movement type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for MovementType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for MovementType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for MovementType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Movement journal entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub description: String,
    pub date: NaiveDate,
    /// Production record that spawned this entry; null for manual movements
    pub production_id: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

impl Movement {
    pub fn is_manual(&self) -> bool {
        self.production_id.is_none()
    }
}

/// Create movement request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovement {
    pub equipment_id: i32,
    #[validate(range(min = 1, max = 2147483647, message = "Quantity must be between 1 and 2147483647"))]
    pub quantity: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Movement day (YYYY-MM-DD)
    pub date: String,
}

/// Update movement request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovement {
    pub equipment_id: Option<i32>,
    #[validate(range(min = 1, max = 2147483647, message = "Quantity must be between 1 and 2147483647"))]
    pub quantity: Option<i64>,
    #[serde(rename = "type")]
    pub movement_type: Option<MovementType>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Query parameters for movement listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub equipment_id: Option<i32>,
    #[serde(rename = "type")]
    pub movement_type: Option<MovementType>,
}

/// Validated movement filters
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub equipment_id: Option<i32>,
    pub movement_type: Option<MovementType>,
}

/// Fields needed to insert a movement row
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub quantity: i64,
    pub movement_type: MovementType,
    pub description: String,
    pub date: NaiveDate,
    pub production_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_type_wire_names() {
        assert_eq!(serde_json::to_string(&MovementType::Inbound).unwrap(), "\"entrada\"");
        let parsed: MovementType = serde_json::from_str("\"saida\"").unwrap();
        assert_eq!(parsed, MovementType::Outbound);
        assert!(serde_json::from_str::<MovementType>("\"out\"").is_err());
    }

    #[test]
    fn test_stock_delta_direction() {
        assert_eq!(MovementType::Inbound.stock_delta(4), CounterDelta::stock(4));
        assert_eq!(MovementType::Outbound.stock_delta(4), CounterDelta::stock(-4));
    }

    #[test]
    fn test_create_movement_reads_type_field() {
        let req: CreateMovement = serde_json::from_value(serde_json::json!({
            "equipmentId": 3,
            "quantity": 2,
            "type": "saida",
            "description": "Ajuste",
            "date": "2025-01-02"
        }))
        .unwrap();
        assert_eq!(req.movement_type, MovementType::Outbound);
        assert!(req.validate().is_ok());
    }
}
