pub mod appointment;
pub mod auth;
pub mod billing;
pub mod clinic;
pub mod doctor;
pub mod patient;
pub mod prescription;
pub mod rbac;
pub mod salary;
