use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, AssistantService, ChatContext, CompanyRepository, EmployeeRepository,
    KeyValueStore, SaleRepository, TaskRepository,
};
use crate::domain::models::user::User;
use crate::domain::services::chat_service::ChatService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub sale_repo: Arc<dyn SaleRepository>,
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub assistant_service: Arc<dyn AssistantService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    /// Snapshot shipped alongside every assistant request: the actor plus
    /// everything in their company's scope.
    pub fn chat_context(&self, user: &User) -> ChatContext {
        let company_id = user.company_id.clone().unwrap_or_default();
        ChatContext {
            user: user.clone(),
            companies: self.company_repo.list(),
            employees: self.employee_repo.list(&company_id),
            tasks: self.task_repo.list(&company_id),
            sales: self.sale_repo.list(&company_id),
        }
    }
}
