pub mod appointments;
pub mod auth;
pub mod billing;
pub mod clinics;
pub mod doctors;
pub mod patients;
pub mod prescriptions;
pub mod rbac;
pub mod salaries;
