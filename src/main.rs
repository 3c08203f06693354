// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/roles", get(handlers::auth::get_my_roles));

    let patient_routes = Router::new()
        .route("/"
               ,post(handlers::patients::create_patient)
               .get(handlers::patients::list_patients)
        )
        .route("/{id}"
               ,get(handlers::patients::get_patient)
               .put(handlers::patients::update_patient)
               .delete(handlers::patients::delete_patient)
        );

    let doctor_routes = Router::new()
        .route("/"
               ,post(handlers::doctors::create_doctor)
               .get(handlers::doctors::list_doctors)
        )
        .route("/{id}"
               ,get(handlers::doctors::get_doctor)
               .put(handlers::doctors::update_doctor)
        );

    let clinic_routes = Router::new()
        .route("/"
               ,post(handlers::clinics::create_clinic)
               .get(handlers::clinics::list_clinics)
        )
        .route("/{id}", get(handlers::clinics::get_clinic));

    let appointment_routes = Router::new()
        .route("/"
               ,post(handlers::appointments::create_appointment)
               .get(handlers::appointments::list_appointments)
        )
        .route("/{id}", get(handlers::appointments::get_appointment))
        // Edição de valores e pagamentos disparam o recálculo financeiro
        .route("/{id}/fees", put(handlers::appointments::update_appointment_fees))
        .route("/{id}/payments", post(handlers::appointments::register_appointment_payment))
        .route("/{id}/status", put(handlers::appointments::update_appointment_status));

    let prescription_routes = Router::new()
        .route("/"
               ,post(handlers::prescriptions::create_prescription)
               .get(handlers::prescriptions::list_prescriptions)
        )
        .route("/{id}/pdf", get(handlers::prescriptions::generate_prescription_pdf));

    let billing_routes = Router::new()
        .route("/invoices"
               ,post(handlers::billing::create_invoice)
               .get(handlers::billing::list_invoices)
        )
        .route("/invoices/{id}", get(handlers::billing::get_invoice))
        .route("/invoices/{id}/payments", post(handlers::billing::register_invoice_payment));

    let salary_routes = Router::new()
        .route("/"
               ,post(handlers::salaries::create_salary)
               .get(handlers::salaries::list_salaries)
        )
        .route("/{id}/pay", post(handlers::salaries::pay_salary));

    let rbac_routes = Router::new()
        .route("/roles", post(handlers::rbac::create_role))
        .route("/permissions", get(handlers::rbac::list_permissions))
        .route("/assignments", post(handlers::rbac::assign_role));

    // Tudo que não é público fica atrás do auth_guard; os guardiões de
    // cargo/permissão ficam nos handlers.
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/patients", patient_routes)
        .nest("/doctors", doctor_routes)
        .nest("/clinics", clinic_routes)
        .nest("/appointments", appointment_routes)
        .nest("/prescriptions", prescription_routes)
        .nest("/billing", billing_routes)
        .nest("/salaries", salary_routes)
        .nest("/rbac", rbac_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
