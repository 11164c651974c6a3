use crate::domain::models::{
    appointment::{Appointment, AppointmentPatch, NewAppointment},
    company::{Company, CompanyPatch, NewCompany},
    sale::{NewSale, Sale, SalePatch},
    task::{NewTask, Task, TaskPatch},
    user::{EmployeePatch, NewEmployee, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Synchronous key/value persistence substrate. Values are opaque JSON
/// blobs; every collection is stored whole under a single key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str);
}

pub fn read_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    match store.get(key) {
        Some(value) => match serde_json::from_value(value) {
            Ok(items) => items,
            Err(e) => {
                error!("Corrupt collection under key \"{}\": {}", key, e);
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

pub fn write_collection<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) {
    match serde_json::to_value(items) {
        Ok(value) => store.set(key, value),
        Err(e) => error!("Failed to serialize collection for key \"{}\": {}", key, e),
    }
}

pub trait TaskRepository: Send + Sync {
    fn list(&self, company_id: &str) -> Vec<Task>;
    fn get_by_id(&self, id: &str) -> Option<Task>;
    fn create(&self, data: NewTask, actor: &User) -> Result<Task, AppError>;
    fn update(&self, id: &str, patch: TaskPatch, actor: &User) -> Result<Task, AppError>;
    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError>;
}

pub trait AppointmentRepository: Send + Sync {
    fn list(&self, company_id: &str) -> Vec<Appointment>;
    fn get_by_id(&self, id: &str) -> Option<Appointment>;
    fn create(&self, data: NewAppointment, actor: &User) -> Result<Appointment, AppError>;
    fn update(&self, id: &str, patch: AppointmentPatch, actor: &User)
        -> Result<Appointment, AppError>;
    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError>;
}

pub trait SaleRepository: Send + Sync {
    fn list(&self, company_id: &str) -> Vec<Sale>;
    fn get_by_id(&self, id: &str) -> Option<Sale>;
    fn create(&self, data: NewSale, actor: &User) -> Result<Sale, AppError>;
    fn update(&self, id: &str, patch: SalePatch, actor: &User) -> Result<Sale, AppError>;
    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError>;
}

/// No delete: the roster only grows or gets edited. The actor is optional
/// because first-authentication bootstrap and onboarding self-updates run
/// before a fully-provisioned actor exists; when present, the policy applies.
pub trait EmployeeRepository: Send + Sync {
    fn list(&self, company_id: &str) -> Vec<User>;
    fn get_by_id(&self, id: &str) -> Option<User>;
    fn create(&self, id: &str, data: NewEmployee, actor: Option<&User>) -> Result<User, AppError>;
    fn update(
        &self,
        id: &str,
        patch: EmployeePatch,
        actor: Option<&User>,
    ) -> Result<User, AppError>;
}

pub trait CompanyRepository: Send + Sync {
    fn list(&self) -> Vec<Company>;
    fn get_by_id(&self, id: &str) -> Option<Company>;
    fn create(&self, data: NewCompany) -> Result<Company, AppError>;
    fn update(&self, id: &str, patch: CompanyPatch, actor: &User) -> Result<Company, AppError>;
}

/// Context snapshot shipped with every assistant request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub user: User,
    pub companies: Vec<Company>,
    pub employees: Vec<User>,
    pub tasks: Vec<Task>,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantRequest {
    pub question: String,
    pub context: ChatContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantReply {
    pub answer: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn ask(&self, request: AssistantRequest) -> Result<AssistantReply, AppError>;
}
