//! Employee directory service

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, UpdateEmployee},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        self.repository.employees.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        let employee = self.repository.employees.create(data).await?;
        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
        self.repository.employees.update(id, data).await
    }

    /// Delete an employee with no history; others must be deactivated
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.employees.get_by_id(id).await?;

        if self.repository.production.exists_for_employee(id).await?
            || self.repository.separations.exists_for_employee(id).await?
        {
            return Err(AppError::Validation(
                "Employee has recorded work and cannot be deleted; deactivate it instead".to_string(),
            ));
        }

        self.repository.employees.delete(id).await?;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}
