use std::env;

#[derive(Clone)]
pub struct Config {
    pub assistant_base_url: String,
    pub assistant_api_key: String,
    pub storage_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            assistant_base_url: env::var("ASSISTANT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/v1".to_string()),
            assistant_api_key: env::var("ASSISTANT_API_KEY").unwrap_or_default(),
            storage_path: env::var("STORAGE_PATH").ok(),
        }
    }
}
