use crate::domain::models::task::{NewTask, Task, TaskPatch};
use crate::domain::models::user::User;
use crate::domain::ports::{read_collection, write_collection, KeyValueStore, TaskRepository};
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use crate::error::AppError;
use std::sync::Arc;

const STORAGE_KEY: &str = "clarityflow-tasks";

pub struct LocalTaskRepo {
    store: Arc<dyn KeyValueStore>,
}

impl LocalTaskRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Task> {
        read_collection(self.store.as_ref(), STORAGE_KEY)
    }

    fn persist(&self, tasks: &[Task]) {
        write_collection(self.store.as_ref(), STORAGE_KEY, tasks);
    }

    fn resource(company_id: &str, department: &str) -> Resource {
        Resource {
            company_id: company_id.to_string(),
            resource_type: ResourceType::Tasks,
            department: Some(department.to_string()),
        }
    }
}

impl TaskRepository for LocalTaskRepo {
    fn list(&self, company_id: &str) -> Vec<Task> {
        self.load()
            .into_iter()
            .filter(|task| task.company_id == company_id)
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Task> {
        self.load().into_iter().find(|task| task.id == id)
    }

    fn create(&self, data: NewTask, actor: &User) -> Result<Task, AppError> {
        let resource = Self::resource(&data.company_id, data.department.as_str());
        if !has_permission(actor, &resource, Operation::Write) {
            return Err(AppError::PermissionDenied("write tasks".to_string()));
        }
        data.validate()?;

        let task = Task::new(data);
        let mut tasks = self.load();
        tasks.push(task.clone());
        self.persist(&tasks);
        Ok(task)
    }

    fn update(&self, id: &str, patch: TaskPatch, actor: &User) -> Result<Task, AppError> {
        let mut tasks = self.load();
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

        let resource = Self::resource(&tasks[index].company_id, tasks[index].department.as_str());
        if !has_permission(actor, &resource, Operation::Write) {
            return Err(AppError::PermissionDenied("write tasks".to_string()));
        }
        patch.validate()?;

        tasks[index].apply(patch);
        let updated = tasks[index].clone();
        self.persist(&tasks);
        Ok(updated)
    }

    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError> {
        let mut tasks = self.load();
        let task = tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

        let resource = Self::resource(&task.company_id, task.department.as_str());
        if !has_permission(actor, &resource, Operation::Write) {
            return Err(AppError::PermissionDenied("write tasks".to_string()));
        }

        tasks.retain(|task| task.id != id);
        self.persist(&tasks);
        Ok(())
    }
}
