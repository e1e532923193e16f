//! Stock reconciliation engine
//!
//! Two paths keep the equipment counters in line with the journals:
//!
//! - the inline path turns every production (or manual movement) mutation
//!   into [`CounterDelta`]s that the repository applies atomically;
//! - the batch path recomputes the counters from scratch out of the full
//!   production and movement journals and overwrites drifted values.
//!
//! Both are built on the same [`LedgerEntry`] so they cannot disagree about
//! what a record is worth: normal production feeds `currentStock`, reset
//! production feeds `totalResets` only, and manual movements move
//! `currentStock` in their direction.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        equipment::{CounterDelta, Equipment, StockCounters},
        movement::Movement,
        production::ProductionRecord,
    },
    repository::Repository,
};

/// What a journal row contributes to one equipment's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub equipment_id: i32,
    pub delta: CounterDelta,
}

impl LedgerEntry {
    pub fn production(equipment_id: i32, quantity: i64, is_reset: bool) -> Self {
        let delta = if is_reset {
            CounterDelta::resets(quantity)
        } else {
            CounterDelta::stock(quantity)
        };
        Self { equipment_id, delta }
    }
}

impl From<&ProductionRecord> for LedgerEntry {
    fn from(record: &ProductionRecord) -> Self {
        LedgerEntry::production(record.equipment_id, record.quantity, record.is_reset)
    }
}

impl From<&Movement> for LedgerEntry {
    /// Movements spawned by production are mirrors of the production
    /// record and carry no effect of their own.
    fn from(movement: &Movement) -> Self {
        let delta = if movement.is_manual() {
            movement.movement_type.stock_delta(movement.quantity)
        } else {
            CounterDelta::default()
        };
        Self {
            equipment_id: movement.equipment_id,
            delta,
        }
    }
}

/// Counter change applied when an entry is written
pub fn create_effect(entry: LedgerEntry) -> (i32, CounterDelta) {
    (entry.equipment_id, entry.delta)
}

/// Counter change applied when an entry is removed
pub fn delete_effect(entry: LedgerEntry) -> (i32, CounterDelta) {
    (entry.equipment_id, entry.delta.negated())
}

/// Counter changes applied when `old` is replaced by `new`.
///
/// On the same equipment the two effects fold into one delta: a quantity
/// change yields `new - old` on the record's counter, a reset-flag flip
/// yields `-old` on one counter and `+new` on the other. Moving the record
/// to another equipment reverses it on the old one and applies it on the
/// new one. Zero deltas are dropped.
pub fn update_effects(old: LedgerEntry, new: LedgerEntry) -> Vec<(i32, CounterDelta)> {
    let effects = if old.equipment_id == new.equipment_id {
        vec![(new.equipment_id, new.delta + old.delta.negated())]
    } else {
        vec![delete_effect(old), create_effect(new)]
    };
    effects.into_iter().filter(|(_, d)| !d.is_zero()).collect()
}

/// Equipment rows an update must lock, in id order.
///
/// Each item is `(equipment_id, must_be_live)`: a record may stay on
/// archived equipment, but may only move onto live equipment.
pub fn update_lock_order(old_equipment: i32, new_equipment: i32) -> Vec<(i32, bool)> {
    let mut ids = vec![(old_equipment, false)];
    if new_equipment != old_equipment {
        ids.push((new_equipment, true));
    }
    ids.sort_unstable_by_key(|(id, _)| *id);
    ids
}

/// Recompute every equipment's counters from the journals.
///
/// Sums are clamped at zero once, at the end, matching the storage floor.
pub fn recompute<I>(entries: I) -> HashMap<i32, StockCounters>
where
    I: IntoIterator<Item = LedgerEntry>,
{
    let mut sums: HashMap<i32, CounterDelta> = HashMap::new();
    for entry in entries {
        let sum = sums.entry(entry.equipment_id).or_default();
        *sum = *sum + entry.delta;
    }
    sums.into_iter()
        .map(|(id, sum)| {
            let mut counters = StockCounters::default();
            counters.apply(sum);
            (id, counters)
        })
        .collect()
}

/// Stored versus recomputed counters of one equipment
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentReconciliation {
    pub equipment_id: i32,
    pub model_name: String,
    pub stored: StockCounters,
    pub expected: StockCounters,
}

impl EquipmentReconciliation {
    pub fn is_consistent(&self) -> bool {
        self.stored == self.expected
    }
}

/// Outcome of a batch reconciliation run
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub production_records: usize,
    pub reset_records: usize,
    pub manual_movements: usize,
    pub equipment: Vec<EquipmentReconciliation>,
}

impl ReconciliationReport {
    /// Compare the ledger against the journals.
    ///
    /// Equipment without any journal rows is expected to be at zero.
    pub fn build(
        equipment: &[Equipment],
        production: &[ProductionRecord],
        manual_movements: &[Movement],
    ) -> Self {
        let expected = recompute(
            production
                .iter()
                .map(LedgerEntry::from)
                .chain(manual_movements.iter().map(LedgerEntry::from)),
        );

        // Stable, model-name ordering for operators reading the report
        let by_name: BTreeMap<&str, &Equipment> =
            equipment.iter().map(|e| (e.model_name.as_str(), e)).collect();

        let equipment = by_name
            .values()
            .map(|e| EquipmentReconciliation {
                equipment_id: e.id,
                model_name: e.model_name.clone(),
                stored: e.counters(),
                expected: expected.get(&e.id).copied().unwrap_or_default(),
            })
            .collect();

        Self {
            production_records: production.len(),
            reset_records: production.iter().filter(|p| p.is_reset).count(),
            manual_movements: manual_movements.len(),
            equipment,
        }
    }

    pub fn discrepancies(&self) -> impl Iterator<Item = &EquipmentReconciliation> {
        self.equipment.iter().filter(|e| !e.is_consistent())
    }

    pub fn is_consistent(&self) -> bool {
        self.discrepancies().next().is_none()
    }
}

/// Batch reconciliation over the whole database
#[derive(Clone)]
pub struct ReconciliationService {
    repository: Repository,
}

impl ReconciliationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Load the journals and compare them with the stored counters
    pub async fn verify(&self) -> AppResult<ReconciliationReport> {
        let equipment = self.repository.equipment.list(true).await?;
        let production = self.repository.production.all().await?;
        let movements = self.repository.movements.all_manual().await?;

        let report = ReconciliationReport::build(&equipment, &production, &movements);
        tracing::info!(
            production_records = report.production_records,
            reset_records = report.reset_records,
            manual_movements = report.manual_movements,
            equipment = report.equipment.len(),
            discrepancies = report.discrepancies().count(),
            "Reconciliation check completed"
        );
        Ok(report)
    }

    /// Overwrite every drifted equipment with the recomputed counters
    pub async fn repair(&self) -> AppResult<ReconciliationReport> {
        let report = self.verify().await?;
        for item in report.discrepancies() {
            tracing::warn!(
                equipment_id = item.equipment_id,
                model = %item.model_name,
                stored_stock = item.stored.current_stock,
                expected_stock = item.expected.current_stock,
                stored_resets = item.stored.total_resets,
                expected_resets = item.expected.total_resets,
                "Correcting equipment counters"
            );
            self.repository
                .equipment
                .overwrite_counters(item.equipment_id, item.expected)
                .await?;
        }
        Ok(report)
    }
}
