// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::db::{
    AppointmentRepository, BillingRepository, ClinicRepository, DoctorRepository,
    PatientRepository, PrescriptionRepository, RbacRepository, SalaryRepository, UserRepository,
};
use crate::services::{
    appointment_service::AppointmentService, auth::AuthService, billing_service::BillingService,
    document_service::DocumentService, fee_service::FeeService, rbac_service::RbacService,
    salary_service::SalaryService,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    // Repositórios que os handlers/guardiões usam direto
    pub rbac_repo: RbacRepository,
    pub patient_repo: PatientRepository,
    pub doctor_repo: DoctorRepository,
    pub clinic_repo: ClinicRepository,
    pub prescription_repo: PrescriptionRepository,

    // Serviços
    pub auth_service: AuthService,
    pub rbac_service: RbacService,
    pub appointment_service: AppointmentService,
    pub billing_service: BillingService,
    pub salary_service: SalaryService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let patient_repo = PatientRepository::new(db_pool.clone());
        let doctor_repo = DoctorRepository::new(db_pool.clone());
        let clinic_repo = ClinicRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let prescription_repo = PrescriptionRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let salary_repo = SalaryRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let rbac_service = RbacService::new(rbac_repo.clone(), db_pool.clone());
        let fee_service = FeeService::new(appointment_repo.clone());
        let appointment_service = AppointmentService::new(
            appointment_repo.clone(),
            doctor_repo.clone(),
            fee_service,
            db_pool.clone(),
        );
        let billing_service = BillingService::new(billing_repo, db_pool.clone());
        let salary_service = SalaryService::new(
            salary_repo,
            doctor_repo.clone(),
            appointment_repo,
            db_pool.clone(),
        );
        let document_service = DocumentService::new(prescription_repo.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            rbac_repo,
            patient_repo,
            doctor_repo,
            clinic_repo,
            prescription_repo,
            auth_service,
            rbac_service,
            appointment_service,
            billing_service,
            salary_service,
            document_service,
        })
    }
}
