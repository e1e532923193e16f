//! Business logic services

pub mod employees;
pub mod equipment;
pub mod movements;
pub mod production;
pub mod reconciliation;
pub mod separations;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub employees: employees::EmployeesService,
    pub equipment: equipment::EquipmentService,
    pub movements: movements::MovementsService,
    pub production: production::ProductionService,
    pub reconciliation: reconciliation::ReconciliationService,
    pub separations: separations::SeparationsService,
    /// Kept for the health check
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            employees: employees::EmployeesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            movements: movements::MovementsService::new(repository.clone()),
            production: production::ProductionService::new(repository.clone()),
            reconciliation: reconciliation::ReconciliationService::new(repository.clone()),
            separations: separations::SeparationsService::new(repository.clone()),
            repository,
        }
    }
}
