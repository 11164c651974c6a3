use crate::domain::models::company::{Company, CompanyPatch, NewCompany};
use crate::domain::models::user::User;
use crate::domain::ports::{read_collection, write_collection, CompanyRepository, KeyValueStore};
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use crate::error::AppError;
use std::sync::Arc;

const STORAGE_KEY: &str = "clarityflow-companies";

pub struct LocalCompanyRepo {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCompanyRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Company> {
        read_collection(self.store.as_ref(), STORAGE_KEY)
    }

    fn persist(&self, companies: &[Company]) {
        write_collection(self.store.as_ref(), STORAGE_KEY, companies);
    }
}

impl CompanyRepository for LocalCompanyRepo {
    fn list(&self) -> Vec<Company> {
        self.load()
    }

    fn get_by_id(&self, id: &str) -> Option<Company> {
        self.load().into_iter().find(|company| company.id == id)
    }

    // Unchecked on purpose: company creation happens during onboarding,
    // before the creating user belongs to any tenant the policy could
    // match against.
    fn create(&self, data: NewCompany) -> Result<Company, AppError> {
        data.validate()?;

        let company = Company::new(data);
        let mut companies = self.load();
        companies.push(company.clone());
        self.persist(&companies);
        Ok(company)
    }

    fn update(&self, id: &str, patch: CompanyPatch, actor: &User) -> Result<Company, AppError> {
        let mut companies = self.load();
        let index = companies
            .iter()
            .position(|company| company.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Company {}", id)))?;

        let resource = Resource {
            company_id: companies[index].id.clone(),
            resource_type: ResourceType::Company,
            department: None,
        };
        if !has_permission(actor, &resource, Operation::Write) {
            return Err(AppError::PermissionDenied("write company settings".to_string()));
        }
        patch.validate()?;

        companies[index].apply(patch);
        let updated = companies[index].clone();
        self.persist(&companies);
        Ok(updated)
    }
}
