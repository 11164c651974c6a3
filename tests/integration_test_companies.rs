mod common;

use clarityflow::domain::models::company::{CompanyPatch, NewCompany};
use clarityflow::domain::models::user::{Department, Role};
use clarityflow::error::AppError;
use common::TestApp;

#[tokio::test]
async fn test_onboarding_creates_company_unchecked() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    assert_eq!(app.state.company_repo.list().len(), 1);
    assert_eq!(
        app.state.company_repo.get_by_id(&company.id).unwrap().name,
        "Acme"
    );

    let err = app
        .state
        .company_repo
        .create(NewCompany {
            name: "   ".to_string(),
            description: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_owner_updates_company_settings() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let owner = app.actor(&company.id, Role::Owner, None);

    let updated = app
        .state
        .company_repo
        .update(
            &company.id,
            CompanyPatch {
                name: Some("Acme Corp".to_string()),
                description: Some("Makes everything".to_string()),
            },
            &owner,
        )
        .unwrap();
    assert_eq!(updated.name, "Acme Corp");
}

#[tokio::test]
async fn test_admin_manager_cannot_update_company_settings() {
    // Admin department covers the company resource, but the Manager role is
    // excluded from company settings writes.
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let manager = app.actor(&company.id, Role::Manager, Some(Department::Admin));

    let err = app
        .state
        .company_repo
        .update(
            &company.id,
            CompanyPatch {
                name: Some("Coup".to_string()),
                description: None,
            },
            &manager,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
    assert_eq!(app.state.company_repo.get_by_id(&company.id).unwrap().name, "Acme");
}

#[tokio::test]
async fn test_update_unknown_company_is_not_found() {
    let app = TestApp::new();
    let company = app.seed_company("Acme");
    let owner = app.actor(&company.id, Role::Owner, None);

    let err = app
        .state
        .company_repo
        .update("ghost", CompanyPatch::default(), &owner)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
