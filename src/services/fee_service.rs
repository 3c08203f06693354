// src/services/fee_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::AppointmentRepository,
    models::appointment::{Appointment, AppointmentFinancials, PaymentStatus},
    models::doctor::Doctor,
};

/// Divisão de um valor entre o médico e a clínica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub doctor_part: Decimal,
    pub center_part: Decimal,
}

/// Parte de cada um na tarifa de consulta.
///
/// Primeira visita gratuita zera os dois lados. Fora isso, cada desconto
/// incide de forma independente sobre a MESMA tarifa base: as duas partes
/// não são complementares e a soma não precisa fechar com a tarifa.
pub fn consultation_split(appointment: &Appointment) -> FeeSplit {
    if appointment.is_first_visit_free {
        return FeeSplit {
            doctor_part: Decimal::ZERO,
            center_part: Decimal::ZERO,
        };
    }

    let base = appointment.base_consultation_fee;
    FeeSplit {
        doctor_part: (base - appointment.doctor_discount).max(Decimal::ZERO),
        center_part: (base - appointment.center_discount).max(Decimal::ZERO),
    }
}

/// Parte de cada um nos procedimentos adicionais, pelo percentual do médico.
/// Sem médico vinculado (ou percentual <= 0), o valor inteiro fica com a
/// clínica.
pub fn procedure_split(
    appointment: &Appointment,
    procedure_fee_percentage: Option<Decimal>,
) -> FeeSplit {
    let amount = appointment.additional_procedures_amount.max(Decimal::ZERO);

    let percentage = procedure_fee_percentage.unwrap_or(Decimal::ZERO);
    if percentage <= Decimal::ZERO {
        return FeeSplit {
            doctor_part: Decimal::ZERO,
            center_part: amount,
        };
    }

    let doctor_part = amount * percentage / Decimal::ONE_HUNDRED;
    FeeSplit {
        doctor_part,
        center_part: amount - doctor_part,
    }
}

/// Saldo em aberto do paciente: max(0, recebido - adiantamento).
pub fn remaining_balance(appointment: &Appointment) -> Decimal {
    (appointment.amount_received - appointment.advance_payment).max(Decimal::ZERO)
}

pub fn payment_status_for(amount_received: Decimal, remaining: Decimal) -> PaymentStatus {
    if amount_received <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else if remaining > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Paid
    }
}

/// Consolida o cálculo inteiro. Função pura: mesmo dado de entrada, mesmo
/// resultado — chamar duas vezes seguidas não muda nada.
pub fn compute(appointment: &Appointment, doctor: Option<&Doctor>) -> AppointmentFinancials {
    let consultation = consultation_split(appointment);
    let procedures = procedure_split(appointment, doctor.map(|d| d.procedure_fee_percentage));
    let remaining = remaining_balance(appointment);

    AppointmentFinancials {
        doctor_consultation_fee: consultation.doctor_part,
        center_consultation_fee: consultation.center_part,
        doctor_procedures_fee: procedures.doctor_part,
        center_procedures_fee: procedures.center_part,
        total_doctor_fee: consultation.doctor_part + procedures.doctor_part,
        total_center_fee: consultation.center_part + procedures.center_part,
        remaining_amount: remaining,
        payment_status: payment_status_for(appointment.amount_received, remaining),
    }
}

#[derive(Clone)]
pub struct FeeService {
    repo: AppointmentRepository,
}

impl FeeService {
    pub fn new(repo: AppointmentRepository) -> Self {
        Self { repo }
    }

    /// Recalcula e persiste os derivados da consulta num UPDATE só.
    ///
    /// Esse é o ÚNICO caminho que sobrescreve os campos derivados. Precisa
    /// ser chamado explicitamente depois de qualquer edição nas entradas —
    /// um save avulso de outro campo não dispara nada.
    pub async fn recalculate<'e, E>(
        &self,
        executor: E,
        appointment: &Appointment,
        doctor: Option<&Doctor>,
    ) -> Result<AppointmentFinancials, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let financials = compute(appointment, doctor);

        self.repo
            .update_financials(executor, appointment.id, &financials)
            .await?;

        Ok(financials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::AppointmentStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn base_appointment() -> Appointment {
        let now = Utc::now();
        Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: Some(Uuid::new_v4()),
            clinic_id: Uuid::new_v4(),
            scheduled_at: now,
            status: AppointmentStatus::Scheduled,
            base_consultation_fee: Decimal::ZERO,
            center_discount: Decimal::ZERO,
            doctor_discount: Decimal::ZERO,
            additional_procedures_amount: Decimal::ZERO,
            is_first_visit_free: false,
            amount_received: Decimal::ZERO,
            advance_payment: Decimal::ZERO,
            doctor_consultation_fee: Decimal::ZERO,
            center_consultation_fee: Decimal::ZERO,
            doctor_procedures_fee: Decimal::ZERO,
            center_procedures_fee: Decimal::ZERO,
            total_doctor_fee: Decimal::ZERO,
            total_center_fee: Decimal::ZERO,
            remaining_amount: Decimal::ZERO,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }

    fn doctor_with_percentage(percentage: i64) -> Doctor {
        let now = Utc::now();
        Doctor {
            id: Uuid::new_v4(),
            full_name: "Dra. Helena Prado".into(),
            specialty: "Dermatologia".into(),
            license_number: "CRM-SP 445566".into(),
            procedure_fee_percentage: Decimal::from(percentage),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn independent_discounts_on_the_same_base_fee() {
        // base=100, desconto do médico=20, desconto da clínica=10
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(100);
        appt.doctor_discount = Decimal::from(20);
        appt.center_discount = Decimal::from(10);

        let split = consultation_split(&appt);
        assert_eq!(split.doctor_part, Decimal::from(80));
        assert_eq!(split.center_part, Decimal::from(90));

        // As partes não são complementares: 80 + 90 != 100.
        assert_ne!(
            split.doctor_part + split.center_part,
            appt.base_consultation_fee
        );
    }

    #[test]
    fn first_free_visit_zeroes_both_consultation_parts() {
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(250);
        appt.is_first_visit_free = true;

        let split = consultation_split(&appt);
        assert_eq!(split.doctor_part, Decimal::ZERO);
        assert_eq!(split.center_part, Decimal::ZERO);
    }

    #[test]
    fn oversized_discount_clamps_to_zero_instead_of_going_negative() {
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(50);
        appt.doctor_discount = Decimal::from(80);
        appt.center_discount = Decimal::from(999);

        let split = consultation_split(&appt);
        assert_eq!(split.doctor_part, Decimal::ZERO);
        assert_eq!(split.center_part, Decimal::ZERO);
    }

    #[test]
    fn procedure_split_by_doctor_percentage() {
        // procedimentos=200, percentual do médico=30 => 60 / 140
        let mut appt = base_appointment();
        appt.additional_procedures_amount = Decimal::from(200);

        let doctor = doctor_with_percentage(30);
        let split = procedure_split(&appt, Some(doctor.procedure_fee_percentage));

        assert_eq!(split.doctor_part, Decimal::from(60));
        assert_eq!(split.center_part, Decimal::from(140));
    }

    #[test]
    fn missing_doctor_credits_procedures_entirely_to_the_center() {
        let mut appt = base_appointment();
        appt.doctor_id = None;
        appt.additional_procedures_amount = Decimal::from(150);

        let split = procedure_split(&appt, None);
        assert_eq!(split.doctor_part, Decimal::ZERO);
        assert_eq!(split.center_part, Decimal::from(150));
    }

    #[test]
    fn zero_percentage_behaves_like_missing_doctor() {
        let mut appt = base_appointment();
        appt.additional_procedures_amount = Decimal::from(90);

        let split = procedure_split(&appt, Some(Decimal::ZERO));
        assert_eq!(split.doctor_part, Decimal::ZERO);
        assert_eq!(split.center_part, Decimal::from(90));
    }

    #[test]
    fn totals_are_the_sum_of_consultation_and_procedure_parts() {
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(100);
        appt.doctor_discount = Decimal::from(20);
        appt.center_discount = Decimal::from(10);
        appt.additional_procedures_amount = Decimal::from(200);

        let doctor = doctor_with_percentage(30);
        let fin = compute(&appt, Some(&doctor));

        assert_eq!(
            fin.total_doctor_fee,
            fin.doctor_consultation_fee + fin.doctor_procedures_fee
        );
        assert_eq!(
            fin.total_center_fee,
            fin.center_consultation_fee + fin.center_procedures_fee
        );
        assert_eq!(fin.total_doctor_fee, Decimal::from(140)); // 80 + 60
        assert_eq!(fin.total_center_fee, Decimal::from(230)); // 90 + 140
    }

    #[test]
    fn derived_fees_are_never_negative() {
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(10);
        appt.doctor_discount = Decimal::from(500);
        appt.center_discount = Decimal::from(500);
        appt.additional_procedures_amount = Decimal::from(-40);
        appt.amount_received = Decimal::from(5);
        appt.advance_payment = Decimal::from(50);

        let fin = compute(&appt, Some(&doctor_with_percentage(30)));

        assert!(fin.doctor_consultation_fee >= Decimal::ZERO);
        assert!(fin.center_consultation_fee >= Decimal::ZERO);
        assert!(fin.doctor_procedures_fee >= Decimal::ZERO);
        assert!(fin.center_procedures_fee >= Decimal::ZERO);
        assert!(fin.total_doctor_fee >= Decimal::ZERO);
        assert!(fin.total_center_fee >= Decimal::ZERO);
        assert!(fin.remaining_amount >= Decimal::ZERO);
    }

    #[test]
    fn remaining_amount_is_received_minus_advance_clamped_at_zero() {
        let mut appt = base_appointment();
        appt.amount_received = Decimal::from(120);
        appt.advance_payment = Decimal::from(50);
        assert_eq!(remaining_balance(&appt), Decimal::from(70));

        appt.amount_received = Decimal::from(30);
        appt.advance_payment = Decimal::from(50);
        assert_eq!(remaining_balance(&appt), Decimal::ZERO);
    }

    #[test]
    fn payment_status_follows_received_amount_and_balance() {
        let mut appt = base_appointment();

        // Nada recebido
        assert_eq!(compute(&appt, None).payment_status, PaymentStatus::Unpaid);

        // Recebido mas ainda com saldo
        appt.amount_received = Decimal::from(100);
        appt.advance_payment = Decimal::from(40);
        assert_eq!(compute(&appt, None).payment_status, PaymentStatus::Partial);

        // Saldo zerado
        appt.advance_payment = Decimal::from(100);
        assert_eq!(compute(&appt, None).payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn compute_is_idempotent_for_unchanged_inputs() {
        let mut appt = base_appointment();
        appt.base_consultation_fee = Decimal::from(100);
        appt.doctor_discount = Decimal::from(20);
        appt.center_discount = Decimal::from(10);
        appt.additional_procedures_amount = Decimal::from(200);
        appt.amount_received = Decimal::from(150);
        appt.advance_payment = Decimal::from(50);

        let doctor = doctor_with_percentage(30);
        let first = compute(&appt, Some(&doctor));
        let second = compute(&appt, Some(&doctor));

        assert_eq!(first, second);
    }

    #[test]
    fn fractional_percentage_keeps_the_split_exact() {
        let mut appt = base_appointment();
        appt.additional_procedures_amount = Decimal::new(15050, 2); // 150.50

        // 12.5%
        let split = procedure_split(&appt, Some(Decimal::new(125, 1)));

        assert_eq!(split.doctor_part + split.center_part, Decimal::new(15050, 2));
        assert_eq!(split.doctor_part, Decimal::new(1881250, 5)); // 18.81250
    }
}
