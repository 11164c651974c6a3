use async_trait::async_trait;
use clarityflow::config::Config;
use clarityflow::domain::models::company::{Company, NewCompany};
use clarityflow::domain::models::user::{Department, Role, User};
use clarityflow::domain::ports::{
    AssistantReply, AssistantRequest, AssistantService, KeyValueStore,
};
use clarityflow::error::AppError;
use clarityflow::infra::factory::build_state;
use clarityflow::infra::storage::memory_store::MemoryStore;
use clarityflow::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Script {
    Answer(AssistantReply),
    Fail(String),
}

pub struct MockAssistantService {
    script: Script,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<AssistantRequest>>,
}

#[allow(dead_code)]
impl MockAssistantService {
    pub fn answering(answer: &str) -> Self {
        Self::with_reply(AssistantReply {
            answer: answer.to_string(),
            action: None,
            kind: None,
            data: None,
        })
    }

    pub fn with_reply(reply: AssistantReply) -> Self {
        Self {
            script: Script::Answer(reply),
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            script: Script::Fail(reason.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AssistantRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantService for MockAssistantService {
    async fn ask(&self, request: AssistantRequest) -> Result<AssistantReply, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.script {
            Script::Answer(reply) => Ok(reply.clone()),
            Script::Fail(reason) => Err(AppError::RemoteService(reason.clone())),
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub assistant: Arc<MockAssistantService>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self::with_assistant(MockAssistantService::answering("Mock assistant answer."))
    }

    pub fn with_assistant(mock: MockAssistantService) -> Self {
        let assistant = Arc::new(mock);
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let config = Config {
            assistant_base_url: "http://localhost".to_string(),
            assistant_api_key: "test-key".to_string(),
            storage_path: None,
        };
        let state = build_state(config, store, assistant.clone());
        Self { state, assistant }
    }

    pub fn seed_company(&self, name: &str) -> Company {
        self.state
            .company_repo
            .create(NewCompany {
                name: name.to_string(),
                description: "Test company".to_string(),
            })
            .expect("company should be created")
    }

    pub fn actor(
        &self,
        company_id: &str,
        role: Role,
        department: Option<Department>,
    ) -> User {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name: Some("Test Actor".to_string()),
            email: Some("actor@test.local".to_string()),
            avatar_url: None,
            company_id: Some(company_id.to_string()),
            role: Some(role),
            department,
        }
    }
}
