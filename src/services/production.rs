//! Production service
//!
//! Every write moves the equipment counters in the same transaction as the
//! production row. The mirrored `entrada` movement is written afterwards
//! and only logged on failure.

use crate::{
    error::{AppError, AppResult},
    models::{
        check_quantity,
        movement::{MovementType, NewMovement},
        parse_day, parse_optional_day,
        production::{
            CreateProduction, NewProduction, ProductionFilter, ProductionQuery, ProductionRecord,
            UpdateProduction,
        },
    },
    repository::{production::DUPLICATE_ENTRY, Repository},
    services::reconciliation::{
        create_effect, delete_effect, update_effects, update_lock_order, LedgerEntry,
    },
};

#[derive(Clone)]
pub struct ProductionService {
    repository: Repository,
}

impl ProductionService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ProductionQuery) -> AppResult<Vec<ProductionRecord>> {
        let filter = ProductionFilter {
            start_date: parse_optional_day("startDate", query.start_date.as_deref())?,
            end_date: parse_optional_day("endDate", query.end_date.as_deref())?,
            employee_id: query.employee_id,
            equipment_id: query.equipment_id,
        };
        self.repository.production.list(&filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ProductionRecord> {
        self.repository.production.get_by_id(id).await
    }

    /// Record production and move the matching counter
    pub async fn create(&self, data: &CreateProduction) -> AppResult<ProductionRecord> {
        check_quantity(data.quantity)?;
        let date = parse_day("date", &data.date)?;
        let employee = self.repository.employees.get_by_id(data.employee_id).await?;

        let mut tx = self.repository.begin().await?;
        let equipment = self
            .repository
            .equipment
            .lock_active(&mut tx, data.equipment_id)
            .await?;

        if self
            .repository
            .production
            .entry_exists(employee.id, equipment.id, date, data.is_reset, None)
            .await?
        {
            return Err(AppError::Duplicate(DUPLICATE_ENTRY.to_string()));
        }

        let record = self
            .repository
            .production
            .insert(
                &mut tx,
                &NewProduction {
                    employee_id: employee.id,
                    employee_name: employee.name,
                    equipment_id: equipment.id,
                    equipment_model: equipment.model_name,
                    quantity: data.quantity,
                    date,
                    is_reset: data.is_reset,
                },
            )
            .await?;

        let (equipment_id, delta) = create_effect(LedgerEntry::from(&record));
        let equipment = self
            .repository
            .equipment
            .apply_delta(&mut tx, equipment_id, delta)
            .await?;
        tx.commit().await?;

        tracing::info!(
            production_id = record.id,
            equipment_id,
            quantity = record.quantity,
            is_reset = record.is_reset,
            current_stock = equipment.current_stock,
            total_resets = equipment.total_resets,
            "Production recorded"
        );

        self.sync_movement(&record).await;
        Ok(record)
    }

    /// Change a record and move the counters by the difference
    pub async fn update(&self, id: i32, data: &UpdateProduction) -> AppResult<ProductionRecord> {
        if let Some(quantity) = data.quantity {
            check_quantity(quantity)?;
        }
        let date = parse_optional_day("date", data.date.as_deref())?;

        let mut tx = self.repository.begin().await?;
        let old = self.repository.production.lock(&mut tx, id).await?;

        let employee_name = match data.employee_id {
            Some(employee_id) if employee_id != old.employee_id => {
                self.repository.employees.get_by_id(employee_id).await?.name
            }
            _ => old.employee_name.clone(),
        };

        let target = data.equipment_id.unwrap_or(old.equipment_id);
        let mut equipment_model = old.equipment_model.clone();
        for (equipment_id, must_be_live) in update_lock_order(old.equipment_id, target) {
            if must_be_live {
                equipment_model = self
                    .repository
                    .equipment
                    .lock_active(&mut tx, equipment_id)
                    .await?
                    .model_name;
            } else {
                self.repository.equipment.lock(&mut tx, equipment_id).await?;
            }
        }

        let next = NewProduction {
            employee_id: data.employee_id.unwrap_or(old.employee_id),
            employee_name,
            equipment_id: target,
            equipment_model,
            quantity: data.quantity.unwrap_or(old.quantity),
            date: date.unwrap_or(old.date),
            is_reset: data.is_reset.unwrap_or(old.is_reset),
        };

        if self
            .repository
            .production
            .entry_exists(next.employee_id, next.equipment_id, next.date, next.is_reset, Some(id))
            .await?
        {
            return Err(AppError::Duplicate(DUPLICATE_ENTRY.to_string()));
        }

        let record = self.repository.production.update(&mut tx, id, &next).await?;

        let mut effects = update_effects(LedgerEntry::from(&old), LedgerEntry::from(&record));
        effects.sort_by_key(|(equipment_id, _)| *equipment_id);
        for (equipment_id, delta) in effects {
            self.repository
                .equipment
                .apply_delta_checked(&mut tx, equipment_id, delta)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(
            production_id = id,
            old_quantity = old.quantity,
            new_quantity = record.quantity,
            old_is_reset = old.is_reset,
            new_is_reset = record.is_reset,
            "Production updated"
        );

        self.sync_movement(&record).await;
        Ok(record)
    }

    /// Delete a record and take its quantity back off the counters.
    ///
    /// Refused when stock already consumed by outbound movements would
    /// leave `currentStock` negative.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        let record = self.repository.production.lock(&mut tx, id).await?;
        self.repository.production.delete(&mut tx, id).await?;

        let (equipment_id, delta) = delete_effect(LedgerEntry::from(&record));
        self.repository
            .equipment
            .apply_delta_checked(&mut tx, equipment_id, delta)
            .await?;
        tx.commit().await?;

        tracing::info!(
            production_id = id,
            equipment_id,
            quantity = record.quantity,
            is_reset = record.is_reset,
            "Production deleted"
        );
        Ok(())
    }

    /// Bring the mirrored movement in line with the record, best effort
    async fn sync_movement(&self, record: &ProductionRecord) {
        if let Err(e) = self.try_sync_movement(record).await {
            tracing::warn!(
                production_id = record.id,
                equipment_id = record.equipment_id,
                error = %e,
                "Failed to write production movement"
            );
        }
    }

    async fn try_sync_movement(&self, record: &ProductionRecord) -> AppResult<()> {
        let movements = &self.repository.movements;
        let existing = movements.find_by_production(record.id).await?;

        match existing {
            Some(_) if record.is_reset => movements.delete_for_production(record.id).await,
            None if record.is_reset => Ok(()),
            Some(movement) => {
                movements
                    .sync_production(movement.id, &production_movement(record))
                    .await?;
                Ok(())
            }
            None => {
                movements.append(&production_movement(record)).await?;
                Ok(())
            }
        }
    }
}

/// Inbound movement mirroring a normal production record
fn production_movement(record: &ProductionRecord) -> NewMovement {
    NewMovement {
        equipment_id: record.equipment_id,
        equipment_name: record.equipment_model.clone(),
        quantity: record.quantity,
        movement_type: MovementType::Inbound,
        description: format!("Entrada por produção - {}", record.equipment_model),
        date: record.date,
        production_id: Some(record.id),
    }
}
