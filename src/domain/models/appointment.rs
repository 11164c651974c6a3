use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub client_ids: Vec<String>,
    pub user_ids: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub company_id: String,
}

impl Appointment {
    /// End time is derived: appointments are fixed at one hour.
    pub fn new(data: NewAppointment) -> Self {
        let end_time = data.start_time + Duration::hours(1);
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            client_ids: data.client_ids,
            user_ids: data.user_ids,
            start_time: data.start_time,
            end_time,
            company_id: data.company_id,
        }
    }

    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(client_ids) = patch.client_ids {
            self.client_ids = client_ids;
        }
        if let Some(user_ids) = patch.user_ids {
            self.user_ids = user_ids;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
    }
}

// No end_time field: a create cannot set it, and unknown JSON keys are
// dropped when the dispatcher deserializes assistant-supplied payloads.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub title: String,
    #[serde(default)]
    pub client_ids: Vec<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub company_id: String,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentPatch {
    pub title: Option<String>,
    pub client_ids: Option<Vec<String>>,
    pub user_ids: Option<Vec<String>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl AppointmentPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title is required".to_string()));
            }
        }
        Ok(())
    }
}
