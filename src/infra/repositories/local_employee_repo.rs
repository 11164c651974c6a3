use crate::domain::models::user::{EmployeePatch, NewEmployee, User};
use crate::domain::ports::{read_collection, write_collection, EmployeeRepository, KeyValueStore};
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use crate::error::AppError;
use std::sync::Arc;

const STORAGE_KEY: &str = "clarityflow-users";

pub struct LocalEmployeeRepo {
    store: Arc<dyn KeyValueStore>,
}

impl LocalEmployeeRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<User> {
        read_collection(self.store.as_ref(), STORAGE_KEY)
    }

    fn persist(&self, employees: &[User]) {
        write_collection(self.store.as_ref(), STORAGE_KEY, employees);
    }

    fn resource(company_id: Option<&str>) -> Resource {
        Resource {
            company_id: company_id.unwrap_or_default().to_string(),
            resource_type: ResourceType::Employees,
            department: None,
        }
    }

    fn check_write(actor: Option<&User>, company_id: Option<&str>) -> Result<(), AppError> {
        if let Some(actor) = actor {
            if !has_permission(actor, &Self::resource(company_id), Operation::Write) {
                return Err(AppError::PermissionDenied("write employees".to_string()));
            }
        }
        Ok(())
    }
}

impl EmployeeRepository for LocalEmployeeRepo {
    fn list(&self, company_id: &str) -> Vec<User> {
        self.load()
            .into_iter()
            .filter(|employee| employee.company_id.as_deref() == Some(company_id))
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<User> {
        self.load().into_iter().find(|employee| employee.id == id)
    }

    fn create(&self, id: &str, data: NewEmployee, actor: Option<&User>) -> Result<User, AppError> {
        Self::check_write(actor, data.company_id.as_deref())?;
        data.validate()?;

        let employee = User::new(id.to_string(), data);
        let mut employees = self.load();
        employees.push(employee.clone());
        self.persist(&employees);
        Ok(employee)
    }

    fn update(
        &self,
        id: &str,
        patch: EmployeePatch,
        actor: Option<&User>,
    ) -> Result<User, AppError> {
        let mut employees = self.load();
        let index = employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", id)))?;

        Self::check_write(actor, employees[index].company_id.as_deref())?;
        patch.validate()?;

        employees[index].apply(patch);
        let updated = employees[index].clone();
        self.persist(&employees);
        Ok(updated)
    }
}
