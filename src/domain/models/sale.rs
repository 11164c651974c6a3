use crate::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Pending,
    Processing,
    Finished,
    Canceled,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value: f64,
    pub status: SaleStatus,
    #[serde(default)]
    pub client: Option<String>,
    pub company_id: String,
}

impl Sale {
    pub fn new(data: NewSale) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            description: data.description,
            value: data.value,
            status: data.status,
            client: data.client,
            company_id: data.company_id,
        }
    }

    pub fn apply(&mut self, patch: SalePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(client) = patch.client {
            self.client = Some(client);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value: f64,
    pub status: SaleStatus,
    #[serde(default)]
    pub client: Option<String>,
    pub company_id: String,
}

impl NewSale {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        validate_value(self.value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SalePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub status: Option<SaleStatus>,
    pub client: Option<String>,
}

impl SalePatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title is required".to_string()));
            }
        }
        if let Some(value) = self.value {
            validate_value(value)?;
        }
        Ok(())
    }
}

fn validate_value(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation("value must be non-negative".to_string()));
    }
    Ok(())
}
