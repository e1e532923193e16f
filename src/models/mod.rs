//! Data models for Mix Production

pub mod employee;
pub mod equipment;
pub mod movement;
pub mod production;
pub mod separation;
pub mod user;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use employee::Employee;
pub use equipment::{CounterDelta, Equipment, StockCounters};
pub use movement::{Movement, MovementType};
pub use production::ProductionRecord;
pub use separation::{MacSeparation, SeparationStatus};
pub use user::{Role, User, UserClaims};

/// Largest quantity a single production record or movement may carry
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// Reject quantities outside `1..=MAX_QUANTITY`
pub fn check_quantity(quantity: i64) -> AppResult<()> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::Validation(format!(
            "Quantity must be between 1 and {}",
            MAX_QUANTITY
        )));
    }
    Ok(())
}

/// Parse a calendar day (YYYY-MM-DD) supplied by a client
pub fn parse_day(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} format, expected YYYY-MM-DD", field)))
}

/// Parse an optional calendar day filter
pub fn parse_optional_day(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_day(field, v))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("date", "2025-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert!(matches!(parse_day("date", "01/01/2025"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_check_quantity_bounds() {
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(check_quantity(0), Err(AppError::Validation(_))));
        assert!(matches!(check_quantity(MAX_QUANTITY + 1), Err(AppError::Validation(_))));
        assert!(check_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_parse_optional_day_skips_blank() {
        assert_eq!(parse_optional_day("startDate", None).unwrap(), None);
        assert_eq!(parse_optional_day("startDate", Some("")).unwrap(), None);
        assert!(parse_optional_day("startDate", Some("2025-13-01")).is_err());
    }
}
