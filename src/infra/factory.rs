use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, AssistantService, CompanyRepository, EmployeeRepository, KeyValueStore,
    SaleRepository, TaskRepository,
};
use crate::domain::services::chat_service::ChatService;
use crate::domain::services::dispatch::ActionDispatcher;
use crate::infra::ai::http_assistant::HttpAssistantService;
use crate::infra::repositories::{
    local_appointment_repo::LocalAppointmentRepo, local_company_repo::LocalCompanyRepo,
    local_employee_repo::LocalEmployeeRepo, local_sale_repo::LocalSaleRepo,
    local_task_repo::LocalTaskRepo,
};
use crate::infra::storage::{json_file_store::JsonFileStore, memory_store::MemoryStore};
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub fn bootstrap_state(config: &Config) -> AppState {
    let store: Arc<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => {
            info!("Using JSON file storage at {}", path);
            Arc::new(JsonFileStore::open(path))
        }
        None => {
            info!("Using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    let assistant: Arc<dyn AssistantService> = Arc::new(HttpAssistantService::new(
        config.assistant_base_url.clone(),
        config.assistant_api_key.clone(),
    ));

    build_state(config.clone(), store, assistant)
}

/// Wires the repositories, dispatcher and chat service over the given
/// substrate and assistant. Test harnesses call this directly with mock
/// ports.
pub fn build_state(
    config: Config,
    store: Arc<dyn KeyValueStore>,
    assistant: Arc<dyn AssistantService>,
) -> AppState {
    let task_repo: Arc<dyn TaskRepository> = Arc::new(LocalTaskRepo::new(store.clone()));
    let appointment_repo: Arc<dyn AppointmentRepository> =
        Arc::new(LocalAppointmentRepo::new(store.clone()));
    let sale_repo: Arc<dyn SaleRepository> = Arc::new(LocalSaleRepo::new(store.clone()));
    let employee_repo: Arc<dyn EmployeeRepository> = Arc::new(LocalEmployeeRepo::new(store.clone()));
    let company_repo: Arc<dyn CompanyRepository> = Arc::new(LocalCompanyRepo::new(store.clone()));

    let dispatcher = ActionDispatcher::new(
        task_repo.clone(),
        appointment_repo.clone(),
        sale_repo.clone(),
        employee_repo.clone(),
    );
    let chat_service = Arc::new(ChatService::new(store.clone(), assistant.clone(), dispatcher));

    AppState {
        config,
        store,
        task_repo,
        appointment_repo,
        sale_repo,
        employee_repo,
        company_repo,
        assistant_service: assistant,
        chat_service,
    }
}
