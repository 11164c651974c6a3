use crate::domain::ports::{AssistantReply, AssistantRequest, AssistantService};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

pub struct HttpAssistantService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpAssistantService {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl AssistantService for HttpAssistantService {
    #[instrument(skip(self, request), fields(question_len = request.question.len()))]
    async fn ask(&self, request: AssistantRequest) -> Result<AssistantReply, AppError> {
        let url = format!("{}/ai/chat", self.base_url);
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .json(&request)
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let reply = response.json::<AssistantReply>().await.map_err(|e| {
                            error!("Failed to parse assistant response JSON: {:?}", e);
                            AppError::RemoteService(format!("invalid response body: {}", e))
                        })?;
                        info!("Assistant replied ({} chars)", reply.answer.len());
                        return Ok(reply);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            let text = response.text().await.unwrap_or_default();
                            error!(
                                "Assistant service failed after {} retries. Status: {}",
                                retries, status
                            );
                            return Err(AppError::RemoteService(format!("HTTP {}: {}", status, text)));
                        }
                        warn!(
                            "Assistant service transient error {}. Retrying in {}ms...",
                            status, backoff
                        );
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        error!("Assistant service rejected request {}: {}", status, text);
                        return Err(AppError::RemoteService(format!("HTTP {}: {}", status, text)));
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        error!("Assistant network error after {} retries: {:?}", retries, e);
                        return Err(AppError::RemoteService(format!("network error: {}", e)));
                    }
                    warn!("Assistant network error. Retrying in {}ms... {:?}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }
}
