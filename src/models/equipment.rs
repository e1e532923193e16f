//! Equipment model and stock counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record (one per model)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    /// Unique model name
    pub model_name: String,
    /// Normal production minus consumption
    pub current_stock: i64,
    /// Cumulative units processed through reset
    pub total_resets: i64,
    /// Set when the equipment has been removed from the catalog
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    pub fn counters(&self) -> StockCounters {
        StockCounters {
            current_stock: self.current_stock,
            total_resets: self.total_resets,
        }
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Model name is required"))]
    pub model_name: String,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Model name cannot be empty"))]
    pub model_name: Option<String>,
    /// Manual stock correction; recorded as an adjustment movement
    #[validate(range(min = 0, max = 2147483647, message = "Stock must be between 0 and 2147483647"))]
    pub current_stock: Option<i64>,
}

/// The two ledger counters of an equipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockCounters {
    pub current_stock: i64,
    pub total_resets: i64,
}

impl StockCounters {
    /// Apply a delta, clamping each counter at zero
    pub fn apply(&mut self, delta: CounterDelta) {
        self.current_stock = (self.current_stock + delta.current_stock).max(0);
        self.total_resets = (self.total_resets + delta.total_resets).max(0);
    }

    /// Apply a delta unless it takes `currentStock` below zero
    pub fn checked_apply(self, delta: CounterDelta) -> Option<StockCounters> {
        let current_stock = self.current_stock.checked_add(delta.current_stock)?;
        if current_stock < 0 {
            return None;
        }
        let mut next = self;
        next.apply(delta);
        Some(next)
    }
}

/// Signed change to the counters of one equipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub current_stock: i64,
    pub total_resets: i64,
}

impl CounterDelta {
    pub fn stock(quantity: i64) -> Self {
        Self {
            current_stock: quantity,
            total_resets: 0,
        }
    }

    pub fn resets(quantity: i64) -> Self {
        Self {
            current_stock: 0,
            total_resets: quantity,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.current_stock == 0 && self.total_resets == 0
    }

    pub fn negated(self) -> Self {
        Self {
            current_stock: -self.current_stock,
            total_resets: -self.total_resets,
        }
    }
}

impl std::ops::Add for CounterDelta {
    type Output = CounterDelta;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            current_stock: self.current_stock.saturating_add(rhs.current_stock),
            total_resets: self.total_resets.saturating_add(rhs.total_resets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps_at_zero() {
        let mut counters = StockCounters {
            current_stock: 3,
            total_resets: 1,
        };
        counters.apply(CounterDelta {
            current_stock: -5,
            total_resets: -4,
        });
        assert_eq!(counters, StockCounters::default());
    }

    #[test]
    fn test_checked_apply_refuses_negative_stock() {
        let counters = StockCounters {
            current_stock: 10,
            total_resets: 2,
        };
        assert_eq!(counters.checked_apply(CounterDelta::stock(-11)), None);
        assert_eq!(
            counters.checked_apply(CounterDelta::stock(-10)),
            Some(StockCounters {
                current_stock: 0,
                total_resets: 2
            })
        );
        assert_eq!(
            counters.checked_apply(CounterDelta::resets(3)).map(|c| c.total_resets),
            Some(5)
        );
    }

    #[test]
    fn test_delta_sum_saturates() {
        let sum = CounterDelta::stock(i64::MAX) + CounterDelta::stock(1);
        assert_eq!(sum.current_stock, i64::MAX);
    }

    #[test]
    fn test_update_request_rejects_negative_stock() {
        let req = UpdateEquipment {
            model_name: None,
            current_stock: Some(-1),
        };
        assert!(req.validate().is_err());
    }
}
