// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_roles,

        // --- Patients ---
        handlers::patients::create_patient,
        handlers::patients::list_patients,
        handlers::patients::get_patient,
        handlers::patients::update_patient,
        handlers::patients::delete_patient,

        // --- Doctors ---
        handlers::doctors::create_doctor,
        handlers::doctors::list_doctors,
        handlers::doctors::get_doctor,
        handlers::doctors::update_doctor,

        // --- Clinics ---
        handlers::clinics::create_clinic,
        handlers::clinics::list_clinics,
        handlers::clinics::get_clinic,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment_fees,
        handlers::appointments::register_appointment_payment,
        handlers::appointments::update_appointment_status,

        // --- Prescriptions ---
        handlers::prescriptions::create_prescription,
        handlers::prescriptions::list_prescriptions,
        handlers::prescriptions::generate_prescription_pdf,

        // --- Billing ---
        handlers::billing::create_invoice,
        handlers::billing::list_invoices,
        handlers::billing::get_invoice,
        handlers::billing::register_invoice_payment,

        // --- Salaries ---
        handlers::salaries::create_salary,
        handlers::salaries::list_salaries,
        handlers::salaries::pay_salary,

        // --- RBAC ---
        handlers::rbac::create_role,
        handlers::rbac::list_permissions,
        handlers::rbac::assign_role,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::Permission,
            models::rbac::AssignedRole,
            models::rbac::CreateRolePayload,
            models::rbac::AssignRolePayload,
            models::rbac::RoleResponse,

            // --- Patients ---
            models::patient::Patient,
            models::patient::CreatePatientPayload,
            models::patient::UpdatePatientPayload,

            // --- Doctors ---
            models::doctor::Doctor,
            models::doctor::CreateDoctorPayload,
            models::doctor::UpdateDoctorPayload,

            // --- Clinics ---
            models::clinic::Clinic,
            models::clinic::CreateClinicPayload,

            // --- Appointments ---
            models::appointment::Appointment,
            models::appointment::AppointmentStatus,
            models::appointment::PaymentStatus,
            models::appointment::AppointmentFinancials,
            models::appointment::CreateAppointmentPayload,
            models::appointment::UpdateAppointmentFeesPayload,
            models::appointment::RegisterPaymentPayload,
            models::appointment::UpdateStatusPayload,

            // --- Prescriptions ---
            models::prescription::Prescription,
            models::prescription::CreatePrescriptionPayload,

            // --- Billing ---
            models::billing::Invoice,
            models::billing::InvoiceStatus,
            models::billing::CreateInvoicePayload,
            models::billing::InvoicePaymentPayload,

            // --- Salaries ---
            models::salary::SalaryRecord,
            models::salary::SalaryStatus,
            models::salary::CreateSalaryPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registro e login"),
        (name = "users", description = "Usuário autenticado"),
        (name = "patients", description = "Cadastro de pacientes"),
        (name = "doctors", description = "Cadastro de médicos"),
        (name = "clinics", description = "Cadastro de clínicas"),
        (name = "appointments", description = "Consultas e financeiro"),
        (name = "prescriptions", description = "Receitas médicas"),
        (name = "billing", description = "Faturamento"),
        (name = "salaries", description = "Folha de pagamento"),
        (name = "rbac", description = "Cargos e permissões"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
