pub mod appointment_service;
pub mod auth;
pub mod authorizer;
pub mod billing_service;
pub mod document_service;
pub mod fee_service;
pub mod rbac_service;
pub mod salary_service;
