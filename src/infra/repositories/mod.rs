pub mod local_appointment_repo;
pub mod local_company_repo;
pub mod local_employee_repo;
pub mod local_sale_repo;
pub mod local_task_repo;
