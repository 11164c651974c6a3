use crate::domain::models::appointment::{Appointment, AppointmentPatch, NewAppointment};
use crate::domain::models::user::User;
use crate::domain::ports::{
    read_collection, write_collection, AppointmentRepository, KeyValueStore,
};
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use crate::error::AppError;
use std::sync::Arc;

const STORAGE_KEY: &str = "clarityflow-appointments";

pub struct LocalAppointmentRepo {
    store: Arc<dyn KeyValueStore>,
}

impl LocalAppointmentRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Appointment> {
        read_collection(self.store.as_ref(), STORAGE_KEY)
    }

    fn persist(&self, appointments: &[Appointment]) {
        write_collection(self.store.as_ref(), STORAGE_KEY, appointments);
    }

    fn resource(company_id: &str) -> Resource {
        Resource {
            company_id: company_id.to_string(),
            resource_type: ResourceType::Appointments,
            department: None,
        }
    }
}

impl AppointmentRepository for LocalAppointmentRepo {
    fn list(&self, company_id: &str) -> Vec<Appointment> {
        self.load()
            .into_iter()
            .filter(|appointment| appointment.company_id == company_id)
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Appointment> {
        self.load()
            .into_iter()
            .find(|appointment| appointment.id == id)
    }

    fn create(&self, data: NewAppointment, actor: &User) -> Result<Appointment, AppError> {
        if !has_permission(actor, &Self::resource(&data.company_id), Operation::Write) {
            return Err(AppError::PermissionDenied("write appointments".to_string()));
        }
        data.validate()?;

        let appointment = Appointment::new(data);
        let mut appointments = self.load();
        appointments.push(appointment.clone());
        self.persist(&appointments);
        Ok(appointment)
    }

    fn update(
        &self,
        id: &str,
        patch: AppointmentPatch,
        actor: &User,
    ) -> Result<Appointment, AppError> {
        let mut appointments = self.load();
        let index = appointments
            .iter()
            .position(|appointment| appointment.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment {}", id)))?;

        if !has_permission(
            actor,
            &Self::resource(&appointments[index].company_id),
            Operation::Write,
        ) {
            return Err(AppError::PermissionDenied("write appointments".to_string()));
        }
        patch.validate()?;

        appointments[index].apply(patch);
        let updated = appointments[index].clone();
        self.persist(&appointments);
        Ok(updated)
    }

    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError> {
        let mut appointments = self.load();
        let appointment = appointments
            .iter()
            .find(|appointment| appointment.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment {}", id)))?;

        if !has_permission(actor, &Self::resource(&appointment.company_id), Operation::Write) {
            return Err(AppError::PermissionDenied("write appointments".to_string()));
        }

        appointments.retain(|appointment| appointment.id != id);
        self.persist(&appointments);
        Ok(())
    }
}
