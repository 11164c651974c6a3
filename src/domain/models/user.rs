use crate::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Manager,
    Employee,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    HR,
    Marketing,
    Engineering,
    Admin,
    Sales,
    General,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::HR => "HR",
            Department::Marketing => "Marketing",
            Department::Engineering => "Engineering",
            Department::Admin => "Admin",
            Department::Sales => "Sales",
            Department::General => "General",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub department: Option<Department>,
}

impl User {
    pub fn new(id: String, data: NewEmployee) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            avatar_url: data.avatar_url,
            company_id: data.company_id,
            role: data.role,
            department: data.department,
        }
    }

    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(company_id) = patch.company_id {
            self.company_id = Some(company_id);
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub company_id: Option<String>,
    pub role: Option<Role>,
    pub department: Option<Department>,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_profile_fields(self.name.as_deref(), self.email.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub company_id: Option<String>,
    pub role: Option<Role>,
    pub department: Option<Department>,
}

impl EmployeePatch {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_profile_fields(self.name.as_deref(), self.email.as_deref())
    }
}

fn validate_profile_fields(name: Option<&str>, email: Option<&str>) -> Result<(), AppError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
    }
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(AppError::Validation("email is invalid".to_string()));
        }
    }
    Ok(())
}
