use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use crate::database::models::{
    FinanceConfirmationInput, GuardReason, IssuePayslipInput, PaymentInput, PayrollRun, Payslip,
    PayslipStatus, TransitionOutcome,
};
use crate::database::repositories::PayslipRepository;
use crate::error::AppError;

/// Owns payslip status. Every transition goes through `PayslipRepository::transition`
/// and a disallowed call comes back as an unapplied outcome rather than an error.
#[derive(Clone)]
pub struct PayslipService {
    payslips: PayslipRepository,
}

impl PayslipService {
    pub fn new(payslips: PayslipRepository) -> Self {
        Self { payslips }
    }

    pub fn issue(&self, input: IssuePayslipInput) -> Result<Payslip, AppError> {
        let mut issued = self.issue_batch(vec![input])?;
        issued
            .pop()
            .ok_or_else(|| AppError::internal_server_error_message("payslip batch came back empty"))
    }

    /// Issue several payslips under one shared `issued_at`, so they can later be
    /// grouped by `lock_run`. Validation failures reject the whole batch and
    /// consume no ids.
    pub fn issue_batch(&self, inputs: Vec<IssuePayslipInput>) -> Result<Vec<Payslip>, AppError> {
        if inputs.is_empty() {
            return Err(AppError::validation("at least one payslip is required"));
        }

        let issued_at = Utc::now();
        let mut payslips = Vec::with_capacity(inputs.len());
        for input in inputs {
            let net_pay = validate_and_net(&input)?;
            payslips.push(Payslip {
                id: String::new(),
                employee_id: input.employee_id,
                period_start: input.period_start,
                period_end: input.period_end,
                gross_pay: input.gross_pay,
                allowances: input.allowances,
                statutory_deductions: input.statutory_deductions,
                loan_deduction: input.loan_deduction,
                net_pay,
                status: PayslipStatus::Issued,
                issued_at,
                confirmed_at: None,
                published_at: None,
                signed_at: None,
                signature_data: None,
                paid_confirmed_by: None,
                paid_confirmed_at: None,
                payment_method: None,
                bank_reference_id: None,
                acknowledged_at: None,
                acknowledged_by: None,
            });
        }

        let payslips = self.payslips.insert_all(payslips)?;
        for payslip in &payslips {
            log::info!(
                "Issued payslip {} for {} (net {})",
                payslip.id,
                payslip.employee_id,
                payslip.net_pay
            );
        }

        Ok(payslips)
    }

    pub fn confirm(&self, id: &str) -> Result<TransitionOutcome<Payslip>, AppError> {
        let outcome = self.payslips.transition(id, |payslip| {
            if payslip.status != PayslipStatus::Issued {
                return Some(GuardReason::InvalidState);
            }
            payslip.status = PayslipStatus::Confirmed;
            payslip.confirmed_at = Some(Utc::now());
            None
        })?;

        log_outcome("confirm", &outcome);
        Ok(outcome)
    }

    pub fn publish(&self, id: &str) -> Result<TransitionOutcome<Payslip>, AppError> {
        let outcome = self.payslips.transition(id, |payslip| {
            if payslip.status != PayslipStatus::Confirmed {
                return Some(GuardReason::InvalidState);
            }
            payslip.status = PayslipStatus::Published;
            payslip.published_at = Some(Utc::now());
            None
        })?;

        log_outcome("publish", &outcome);
        Ok(outcome)
    }

    /// Attach the employee's signature. Status does not move.
    pub fn sign(&self, id: &str, signature_data: &str) -> Result<TransitionOutcome<Payslip>, AppError> {
        if signature_data.trim().is_empty() {
            return Err(AppError::validation("signature data is required"));
        }

        let outcome = self.payslips.transition(id, |payslip| {
            if !matches!(payslip.status, PayslipStatus::Published | PayslipStatus::Paid) {
                return Some(GuardReason::InvalidState);
            }
            if payslip.is_signed() {
                return Some(GuardReason::AlreadySigned);
            }
            payslip.signed_at = Some(Utc::now());
            payslip.signature_data = Some(signature_data.to_string());
            None
        })?;

        log_outcome("sign", &outcome);
        Ok(outcome)
    }

    /// Finance marks a published payslip paid. Recorded payment facts are
    /// never overwritten by a later call.
    pub fn confirm_paid_by_finance(
        &self,
        id: &str,
        input: FinanceConfirmationInput,
    ) -> Result<TransitionOutcome<Payslip>, AppError> {
        if input.confirmed_by.trim().is_empty() {
            return Err(AppError::validation("confirmedBy is required"));
        }

        let outcome = self.payslips.transition(id, |payslip| {
            if let Some(reason) = payment_guard(payslip) {
                return Some(reason);
            }
            payslip.status = PayslipStatus::Paid;
            payslip.paid_confirmed_by = Some(input.confirmed_by);
            payslip.paid_confirmed_at = Some(Utc::now());
            payslip.payment_method = Some(input.payment_method);
            payslip.bank_reference_id = input.bank_reference_id;
            None
        })?;

        log_outcome("confirm payment", &outcome);
        Ok(outcome)
    }

    /// Same destination as `confirm_paid_by_finance`, without a named reviewer.
    pub fn record_payment(
        &self,
        id: &str,
        input: PaymentInput,
    ) -> Result<TransitionOutcome<Payslip>, AppError> {
        let outcome = self.payslips.transition(id, |payslip| {
            if let Some(reason) = payment_guard(payslip) {
                return Some(reason);
            }
            payslip.status = PayslipStatus::Paid;
            payslip.paid_confirmed_at = Some(Utc::now());
            payslip.payment_method = Some(input.payment_method);
            payslip.bank_reference_id = input.bank_reference_id;
            None
        })?;

        log_outcome("record payment", &outcome);
        Ok(outcome)
    }

    /// Employee receipt confirmation; needs both payment and signature.
    pub fn acknowledge(&self, id: &str, employee_id: &str) -> Result<TransitionOutcome<Payslip>, AppError> {
        if employee_id.trim().is_empty() {
            return Err(AppError::validation("employeeId is required"));
        }

        let outcome = self.payslips.transition(id, |payslip| {
            if payslip.status == PayslipStatus::Acknowledged {
                return Some(GuardReason::InvalidState);
            }
            if payslip.status != PayslipStatus::Paid {
                return Some(GuardReason::NotPaid);
            }
            if !payslip.is_signed() {
                return Some(GuardReason::NotSigned);
            }
            if payslip.employee_id != employee_id {
                return Some(GuardReason::EmployeeMismatch);
            }
            payslip.status = PayslipStatus::Acknowledged;
            payslip.acknowledged_at = Some(Utc::now());
            payslip.acknowledged_by = Some(employee_id.to_string());
            None
        })?;

        log_outcome("acknowledge", &outcome);
        Ok(outcome)
    }

    pub fn lock_run(
        &self,
        issued_at: DateTime<Utc>,
        admin_id: &str,
    ) -> Result<TransitionOutcome<PayrollRun>, AppError> {
        if admin_id.trim().is_empty() {
            return Err(AppError::validation("lockedBy is required"));
        }

        let outcome = self.payslips.lock_run(issued_at, admin_id)?;
        match outcome.reason {
            None => log::info!(
                "Locked payroll run {} with {} payslips",
                outcome.record.id,
                outcome.record.payslip_ids.len()
            ),
            Some(reason) => log::debug!("Payroll run {} not relocked ({})", outcome.record.id, reason),
        }

        Ok(outcome)
    }

    pub fn get(&self, id: &str) -> Result<Payslip, AppError> {
        self.payslips
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Payslip", id))
    }

    pub fn get_run(&self, id: &str) -> Result<PayrollRun, AppError> {
        self.payslips
            .find_run(id)?
            .ok_or_else(|| AppError::not_found("Payroll run", id))
    }

    pub fn list_runs(&self) -> Result<Vec<PayrollRun>, AppError> {
        self.payslips.all_runs()
    }

    pub fn get_payslips_by_status(&self, status: PayslipStatus) -> Result<Vec<Payslip>, AppError> {
        self.payslips.find_where(|p| p.status == status)
    }

    pub fn get_signed_payslips(&self) -> Result<Vec<Payslip>, AppError> {
        self.payslips.find_where(Payslip::is_signed)
    }

    pub fn get_unsigned_published(&self) -> Result<Vec<Payslip>, AppError> {
        self.payslips
            .find_where(|p| p.status == PayslipStatus::Published && !p.is_signed())
    }

    pub fn payslips_for_employee(&self, employee_id: &str) -> Result<Vec<Payslip>, AppError> {
        self.payslips.find_where(|p| p.employee_id == employee_id)
    }
}

fn payment_guard(payslip: &Payslip) -> Option<GuardReason> {
    match payslip.status {
        PayslipStatus::Published => None,
        PayslipStatus::Paid | PayslipStatus::Acknowledged => Some(GuardReason::AlreadyPaid),
        _ => Some(GuardReason::InvalidState),
    }
}

fn validate_and_net(input: &IssuePayslipInput) -> Result<BigDecimal, AppError> {
    if input.employee_id.trim().is_empty() {
        return Err(AppError::validation("employeeId is required"));
    }
    if input.period_end < input.period_start {
        return Err(AppError::validation("periodEnd precedes periodStart"));
    }

    let zero = BigDecimal::zero();
    if input.gross_pay < zero
        || input.allowances < zero
        || input.loan_deduction < zero
        || input.statutory_deductions.has_negative()
    {
        return Err(AppError::validation("payslip amounts cannot be negative"));
    }

    let net_pay = &input.gross_pay + &input.allowances
        - input.statutory_deductions.total()
        - &input.loan_deduction;
    if net_pay < zero {
        return Err(AppError::validation(format!(
            "deductions exceed earnings for {} (net {})",
            input.employee_id, net_pay
        )));
    }

    Ok(net_pay)
}

fn log_outcome(action: &str, outcome: &TransitionOutcome<Payslip>) {
    match outcome.reason {
        None => log::info!(
            "Payslip {} {}: now {}",
            outcome.record.id,
            action,
            outcome.record.status
        ),
        Some(reason) => log::debug!(
            "Payslip {} {} ignored ({}), status {}",
            outcome.record.id,
            action,
            reason,
            outcome.record.status
        ),
    }
}
