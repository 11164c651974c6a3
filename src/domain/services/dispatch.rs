use crate::domain::models::{
    appointment::NewAppointment, sale::NewSale, task::NewTask, user::NewEmployee, user::User,
};
use crate::domain::ports::{
    AppointmentRepository, EmployeeRepository, SaleRepository, TaskRepository,
};
use crate::error::AppError;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

/// Executes a mutation requested by the assistant's reply. Failures stay
/// here: the conversation must keep flowing even when the requested action
/// cannot be performed, so every downstream error is logged and swallowed.
#[derive(Clone)]
pub struct ActionDispatcher {
    tasks: Arc<dyn TaskRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    sales: Arc<dyn SaleRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl ActionDispatcher {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        sales: Arc<dyn SaleRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            tasks,
            appointments,
            sales,
            employees,
        }
    }

    pub fn perform(&self, kind: &str, action: &str, data: Value, actor: &User) {
        if let Err(e) = self.try_perform(kind, action, data, actor) {
            error!("Failed to perform assistant action {}-{}: {}", action, kind, e);
        }
    }

    fn try_perform(
        &self,
        kind: &str,
        action: &str,
        mut data: Value,
        actor: &User,
    ) -> Result<(), AppError> {
        // The assistant never chooses the tenant; the actor's company scope
        // is stamped over whatever the reply carried.
        if let Some(object) = data.as_object_mut() {
            object.insert("companyId".to_string(), json!(actor.company_id));
        }

        match (kind, action) {
            ("task", "create") => {
                let payload: NewTask = decode(data)?;
                self.tasks.create(payload, actor)?;
            }
            ("appointment", "create") => {
                let payload: NewAppointment = decode(data)?;
                self.appointments.create(payload, actor)?;
            }
            ("employee", "create") => {
                let payload: NewEmployee = decode(data)?;
                self.employees
                    .create(&Uuid::new_v4().to_string(), payload, Some(actor))?;
            }
            ("sale", "create") => {
                let payload: NewSale = decode(data)?;
                self.sales.create(payload, actor)?;
            }
            _ => {
                warn!("Unknown assistant action: {}-{}", action, kind);
            }
        }
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, AppError> {
    serde_json::from_value(data).map_err(|e| AppError::Validation(e.to_string()))
}
