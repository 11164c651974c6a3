use crate::domain::models::user::{Department, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Employees,
    Tasks,
    Appointments,
    Sales,
    Company,
}

#[derive(Debug, Clone)]
pub struct Resource {
    pub company_id: String,
    pub resource_type: ResourceType,
    pub department: Option<String>,
}

fn department_resources(department: Department) -> &'static [ResourceType] {
    use ResourceType::*;
    match department {
        Department::HR => &[Employees, Tasks, Appointments],
        Department::Sales => &[Sales, Tasks, Appointments],
        Department::Admin => &[Employees, Tasks, Appointments, Sales, Company],
        Department::Marketing | Department::Engineering | Department::General => {
            &[Tasks, Appointments]
        }
    }
}

/// The single authority consulted by every mutator and by the chat command
/// authorizer. Pure: no state is read or written.
///
/// Rules, in order: tenant isolation, Owner override, unrestricted in-tenant
/// read, the department write table, then role — Managers may write anything
/// their department covers except company settings, Employees never write.
pub fn has_permission(user: &User, resource: &Resource, operation: Operation) -> bool {
    if user.company_id.as_deref() != Some(resource.company_id.as_str()) {
        return false;
    }

    if user.role == Some(Role::Owner) {
        return true;
    }

    if operation == Operation::Read {
        return true;
    }

    let allowed: &[ResourceType] = match user.department {
        Some(department) => department_resources(department),
        None => &[],
    };

    if !allowed.contains(&resource.resource_type) {
        return false;
    }

    match user.role {
        Some(Role::Manager) => resource.resource_type != ResourceType::Company,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<Role>, department: Option<Department>) -> User {
        User {
            id: "u1".to_string(),
            name: None,
            email: None,
            avatar_url: None,
            company_id: Some("c1".to_string()),
            role,
            department,
        }
    }

    fn resource(resource_type: ResourceType) -> Resource {
        Resource {
            company_id: "c1".to_string(),
            resource_type,
            department: None,
        }
    }

    #[test]
    fn test_tenant_mismatch_denies_every_role() {
        let foreign = Resource {
            company_id: "other".to_string(),
            resource_type: ResourceType::Tasks,
            department: None,
        };
        for role in [Some(Role::Owner), Some(Role::Manager), Some(Role::Employee), None] {
            let u = user(role, Some(Department::Admin));
            assert!(!has_permission(&u, &foreign, Operation::Read));
            assert!(!has_permission(&u, &foreign, Operation::Write));
        }

        let mut no_company = user(Some(Role::Owner), None);
        no_company.company_id = None;
        assert!(!has_permission(&no_company, &resource(ResourceType::Tasks), Operation::Read));
    }

    #[test]
    fn test_owner_writes_everything_in_tenant() {
        let owner = user(Some(Role::Owner), None);
        for rt in [
            ResourceType::Employees,
            ResourceType::Tasks,
            ResourceType::Appointments,
            ResourceType::Sales,
            ResourceType::Company,
        ] {
            assert!(has_permission(&owner, &resource(rt), Operation::Write));
        }
    }

    #[test]
    fn test_read_is_unrestricted_in_tenant() {
        for role in [Some(Role::Manager), Some(Role::Employee), None] {
            let u = user(role, None);
            assert!(has_permission(&u, &resource(ResourceType::Sales), Operation::Read));
        }
    }

    #[test]
    fn test_manager_department_table() {
        let hr = user(Some(Role::Manager), Some(Department::HR));
        assert!(has_permission(&hr, &resource(ResourceType::Employees), Operation::Write));
        assert!(has_permission(&hr, &resource(ResourceType::Tasks), Operation::Write));
        assert!(!has_permission(&hr, &resource(ResourceType::Sales), Operation::Write));

        let sales = user(Some(Role::Manager), Some(Department::Sales));
        assert!(has_permission(&sales, &resource(ResourceType::Sales), Operation::Write));
        assert!(!has_permission(&sales, &resource(ResourceType::Employees), Operation::Write));

        let marketing = user(Some(Role::Manager), Some(Department::Marketing));
        assert!(has_permission(&marketing, &resource(ResourceType::Appointments), Operation::Write));
        assert!(!has_permission(&marketing, &resource(ResourceType::Sales), Operation::Write));
    }

    #[test]
    fn test_manager_never_writes_company_settings() {
        let admin = user(Some(Role::Manager), Some(Department::Admin));
        assert!(has_permission(&admin, &resource(ResourceType::Employees), Operation::Write));
        assert!(!has_permission(&admin, &resource(ResourceType::Company), Operation::Write));
    }

    #[test]
    fn test_employee_never_writes() {
        let u = user(Some(Role::Employee), Some(Department::Admin));
        for rt in [
            ResourceType::Employees,
            ResourceType::Tasks,
            ResourceType::Appointments,
            ResourceType::Sales,
            ResourceType::Company,
        ] {
            assert!(!has_permission(&u, &resource(rt), Operation::Write));
        }
    }

    #[test]
    fn test_missing_role_or_department_denies_writes() {
        let no_role = user(None, Some(Department::Admin));
        assert!(!has_permission(&no_role, &resource(ResourceType::Tasks), Operation::Write));

        let no_department = user(Some(Role::Manager), None);
        assert!(!has_permission(&no_department, &resource(ResourceType::Tasks), Operation::Write));
    }

    #[test]
    fn test_pure_and_deterministic() {
        let u = user(Some(Role::Manager), Some(Department::HR));
        let r = resource(ResourceType::Employees);
        let first = has_permission(&u, &r, Operation::Write);
        let second = has_permission(&u, &r, Operation::Write);
        assert_eq!(first, second);
    }
}
