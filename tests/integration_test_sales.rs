mod common;

use clarityflow::domain::models::sale::{NewSale, SalePatch, SaleStatus};
use clarityflow::domain::models::user::{Department, Role};
use clarityflow::error::AppError;
use common::TestApp;

fn new_sale(title: &str, value: f64, company_id: &str) -> NewSale {
    NewSale {
        title: title.to_string(),
        description: None,
        value,
        status: SaleStatus::Pending,
        client: Some("Initech".to_string()),
        company_id: company_id.to_string(),
    }
}

#[tokio::test]
async fn test_sales_manager_manages_sales() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let manager = app.actor(&company.id, Role::Manager, Some(Department::Sales));

    let sale = app
        .state
        .sale_repo
        .create(new_sale("Annual license", 1500.0, &company.id), &manager)
        .unwrap();
    assert_eq!(sale.status, SaleStatus::Pending);

    let updated = app
        .state
        .sale_repo
        .update(
            &sale.id,
            SalePatch {
                status: Some(SaleStatus::Finished),
                value: Some(1750.0),
                ..SalePatch::default()
            },
            &manager,
        )
        .unwrap();
    assert_eq!(updated.status, SaleStatus::Finished);
    assert_eq!(updated.value, 1750.0);

    app.state.sale_repo.delete(&sale.id, &manager).unwrap();
    assert!(app.state.sale_repo.list(&company.id).is_empty());
}

#[tokio::test]
async fn test_marketing_manager_cannot_write_sales() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let manager = app.actor(&company.id, Role::Manager, Some(Department::Marketing));

    let err = app
        .state
        .sale_repo
        .create(new_sale("Sneaky deal", 10.0, &company.id), &manager)
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_negative_value_fails_validation() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let owner = app.actor(&company.id, Role::Owner, None);

    let err = app
        .state
        .sale_repo
        .create(new_sale("Refund?", -1.0, &company.id), &owner)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(app.state.sale_repo.list(&company.id).is_empty());

    let sale = app
        .state
        .sale_repo
        .create(new_sale("Valid", 0.0, &company.id), &owner)
        .unwrap();

    let err = app
        .state
        .sale_repo
        .update(
            &sale.id,
            SalePatch {
                value: Some(-5.0),
                ..SalePatch::default()
            },
            &owner,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(app.state.sale_repo.get_by_id(&sale.id).unwrap().value, 0.0);
}
