//! MAC separation work item model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Work item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SeparationStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em_separacao")]
    InProgress,
    #[serde(rename = "concluido")]
    Done,
}

impl SeparationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparationStatus::Pending => "pendente",
            SeparationStatus::InProgress => "em_separacao",
            SeparationStatus::Done => "concluido",
        }
    }
}

impl std::str::FromStr for SeparationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(SeparationStatus::Pending),
            "em_separacao" => Ok(SeparationStatus::InProgress),
            "concluido" => Ok(SeparationStatus::Done),
            _ => Err(format!("Invalid separation status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for SeparationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for SeparationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for SeparationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// MAC separation work item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MacSeparation {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub employee_id: i32,
    pub employee_name: String,
    pub quantity: i64,
    pub date: NaiveDate,
    pub status: SeparationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create separation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeparation {
    pub equipment_id: i32,
    pub employee_id: i32,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i64,
    /// Work day (YYYY-MM-DD)
    pub date: String,
    pub notes: Option<String>,
}

/// Status change request
///
/// The status is taken as a raw string so an unknown value surfaces as a
/// validation error rather than a body rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSeparationStatus {
    pub status: String,
}

/// Query parameters for the per-day listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SeparationQuery {
    /// Work day (YYYY-MM-DD), required
    pub date: Option<String>,
}
