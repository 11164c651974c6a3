use crate::domain::models::sale::{NewSale, Sale, SalePatch};
use crate::domain::models::user::User;
use crate::domain::ports::{read_collection, write_collection, KeyValueStore, SaleRepository};
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use crate::error::AppError;
use std::sync::Arc;

const STORAGE_KEY: &str = "clarityflow-sales";

pub struct LocalSaleRepo {
    store: Arc<dyn KeyValueStore>,
}

impl LocalSaleRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Sale> {
        read_collection(self.store.as_ref(), STORAGE_KEY)
    }

    fn persist(&self, sales: &[Sale]) {
        write_collection(self.store.as_ref(), STORAGE_KEY, sales);
    }

    fn resource(company_id: &str) -> Resource {
        Resource {
            company_id: company_id.to_string(),
            resource_type: ResourceType::Sales,
            department: None,
        }
    }
}

impl SaleRepository for LocalSaleRepo {
    fn list(&self, company_id: &str) -> Vec<Sale> {
        self.load()
            .into_iter()
            .filter(|sale| sale.company_id == company_id)
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Sale> {
        self.load().into_iter().find(|sale| sale.id == id)
    }

    fn create(&self, data: NewSale, actor: &User) -> Result<Sale, AppError> {
        if !has_permission(actor, &Self::resource(&data.company_id), Operation::Write) {
            return Err(AppError::PermissionDenied("write sales".to_string()));
        }
        data.validate()?;

        let sale = Sale::new(data);
        let mut sales = self.load();
        sales.push(sale.clone());
        self.persist(&sales);
        Ok(sale)
    }

    fn update(&self, id: &str, patch: SalePatch, actor: &User) -> Result<Sale, AppError> {
        let mut sales = self.load();
        let index = sales
            .iter()
            .position(|sale| sale.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Sale {}", id)))?;

        if !has_permission(actor, &Self::resource(&sales[index].company_id), Operation::Write) {
            return Err(AppError::PermissionDenied("write sales".to_string()));
        }
        patch.validate()?;

        sales[index].apply(patch);
        let updated = sales[index].clone();
        self.persist(&sales);
        Ok(updated)
    }

    fn delete(&self, id: &str, actor: &User) -> Result<(), AppError> {
        let mut sales = self.load();
        let sale = sales
            .iter()
            .find(|sale| sale.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Sale {}", id)))?;

        if !has_permission(actor, &Self::resource(&sale.company_id), Operation::Write) {
            return Err(AppError::PermissionDenied("write sales".to_string()));
        }

        sales.retain(|sale| sale.id != id);
        self.persist(&sales);
        Ok(())
    }
}
