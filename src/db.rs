pub mod user_repo;
pub use user_repo::UserRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod patient_repo;
pub use patient_repo::PatientRepository;
pub mod doctor_repo;
pub use doctor_repo::DoctorRepository;
pub mod clinic_repo;
pub use clinic_repo::ClinicRepository;
pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod prescription_repo;
pub use prescription_repo::PrescriptionRepository;
pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod salary_repo;
pub use salary_repo::SalaryRepository;
