use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use chrono::{Months, Utc};

use crate::database::models::{
    CappedDeductionInput, CreateLoanInput, DeductionInput, DeductionResult, DeductionView,
    GuardReason, Loan, LoanBalanceHistory, LoanDeduction, LoanStatus, RepaymentInstallment,
    SkipReason, TransitionOutcome,
};
use crate::database::repositories::LoanRepository;
use crate::error::AppError;

/// Longest repayment plan a loan may project to (100 years of months).
pub const MAX_INSTALLMENTS: u32 = 1200;

#[derive(Clone)]
pub struct LoanService {
    loans: LoanRepository,
    default_cap_percent: BigDecimal,
}

impl LoanService {
    pub fn new(loans: LoanRepository, default_cap_percent: BigDecimal) -> Self {
        Self {
            loans,
            default_cap_percent,
        }
    }

    pub fn create_loan(&self, input: CreateLoanInput) -> Result<Loan, AppError> {
        if input.employee_id.trim().is_empty() {
            return Err(AppError::validation("employeeId is required"));
        }
        if input.amount <= BigDecimal::zero() {
            return Err(AppError::validation("amount must be positive"));
        }
        if input.monthly_deduction <= BigDecimal::zero() {
            return Err(AppError::validation("monthlyDeduction must be positive"));
        }
        installment_count(&input.amount, &input.monthly_deduction)?;

        let cap = input
            .deduction_cap_percent
            .unwrap_or_else(|| self.default_cap_percent.clone());
        if cap <= BigDecimal::zero() || cap > BigDecimal::from(100) {
            return Err(AppError::validation(
                "deductionCapPercent must be within (0, 100]",
            ));
        }

        let loan = Loan {
            id: self.loans.next_loan_id(),
            employee_id: input.employee_id,
            loan_type: input.loan_type,
            remaining_balance: input.amount.clone(),
            amount: input.amount,
            monthly_deduction: input.monthly_deduction,
            deduction_cap_percent: cap,
            status: LoanStatus::Active,
            deductions: Vec::new(),
            balance_history: Vec::new(),
            repayment_schedule: Vec::new(),
            created_at: Utc::now(),
        };

        let loan = self.loans.insert(loan)?;
        log::info!(
            "Created {} loan {} for {} ({})",
            loan.loan_type,
            loan.id,
            loan.employee_id,
            loan.amount
        );

        Ok(loan)
    }

    /// Uncapped deduction. The caller is trusted to have computed a safe
    /// amount; only closed loans and repeated payslips are skipped.
    pub fn record_deduction(&self, loan_id: &str, input: DeductionInput) -> Result<DeductionResult, AppError> {
        if input.amount <= BigDecimal::zero() {
            return Err(AppError::validation("deduction amount must be positive"));
        }
        if input.payslip_id.trim().is_empty() {
            return Err(AppError::validation("payslipId is required"));
        }

        let result = self.loans.update(loan_id, |loan| {
            if loan.is_closed() {
                return Ok(skipped(loan, &input.payslip_id, SkipReason::Closed));
            }
            if loan.has_deduction_for(&input.payslip_id) {
                return Ok(skipped(loan, &input.payslip_id, SkipReason::AlreadyDeducted));
            }
            let deduction_id = self.loans.next_deduction_id();
            Ok(apply_deduction(loan, deduction_id, &input.payslip_id, &input.amount))
        })?;

        log_result(&result);
        Ok(result)
    }

    /// `min(monthlyDeduction, remainingBalance, cap% of net pay)`, or zero for
    /// a loan that is not active.
    pub fn compute_capped_deduction(&self, loan_id: &str, net_pay: &BigDecimal) -> Result<BigDecimal, AppError> {
        validate_net_pay(net_pay)?;
        let loan = self.get(loan_id)?;
        Ok(capped_amount(&loan, net_pay))
    }

    pub fn record_capped_deduction(
        &self,
        loan_id: &str,
        input: CappedDeductionInput,
    ) -> Result<DeductionResult, AppError> {
        validate_net_pay(&input.employee_net_pay)?;
        if input.payslip_id.trim().is_empty() {
            return Err(AppError::validation("payslipId is required"));
        }

        let result = self.loans.update(loan_id, |loan| {
            if loan.status != LoanStatus::Active {
                annotate_skip(loan, SkipReason::Frozen);
                return Ok(skipped(loan, &input.payslip_id, SkipReason::Frozen));
            }
            if loan.has_deduction_for(&input.payslip_id) {
                return Ok(skipped(loan, &input.payslip_id, SkipReason::AlreadyDeducted));
            }

            let amount = capped_amount(loan, &input.employee_net_pay);
            if amount <= BigDecimal::zero() {
                annotate_skip(loan, SkipReason::InsufficientNetPay);
                return Ok(skipped(loan, &input.payslip_id, SkipReason::InsufficientNetPay));
            }

            let deduction_id = self.loans.next_deduction_id();
            Ok(apply_deduction(loan, deduction_id, &input.payslip_id, &amount))
        })?;

        log_result(&result);
        Ok(result)
    }

    pub fn freeze(&self, loan_id: &str) -> Result<TransitionOutcome<Loan>, AppError> {
        let outcome = self.transition(loan_id, |loan| {
            if loan.status != LoanStatus::Active {
                return Some(GuardReason::InvalidState);
            }
            loan.status = LoanStatus::Frozen;
            None
        })?;

        log_outcome("freeze", &outcome);
        Ok(outcome)
    }

    /// Only acts on a frozen loan; anything else is a quiet no-op.
    pub fn unfreeze(&self, loan_id: &str) -> Result<TransitionOutcome<Loan>, AppError> {
        let outcome = self.transition(loan_id, |loan| {
            if loan.status != LoanStatus::Frozen {
                return Some(GuardReason::InvalidState);
            }
            loan.status = LoanStatus::Active;
            None
        })?;

        log_outcome("unfreeze", &outcome);
        Ok(outcome)
    }

    pub fn cancel(&self, loan_id: &str) -> Result<TransitionOutcome<Loan>, AppError> {
        let outcome = self.transition(loan_id, |loan| {
            if loan.is_closed() {
                return Some(GuardReason::InvalidState);
            }
            loan.status = LoanStatus::Cancelled;
            None
        })?;

        log_outcome("cancel", &outcome);
        Ok(outcome)
    }

    /// Project monthly installments starting the month after the loan was
    /// created. Installments already covered by recorded deductions come back
    /// marked paid.
    pub fn generate_schedule(&self, loan_id: &str) -> Result<Vec<RepaymentInstallment>, AppError> {
        let projected = project_schedule(&self.get(loan_id)?)?;
        let schedule = self.loans.update(loan_id, move |loan| {
            let mut schedule = projected;
            for installment in schedule.iter_mut().take(loan.deductions.len()) {
                installment.paid = true;
            }
            loan.repayment_schedule = schedule.clone();
            Ok(schedule)
        })?;

        log::info!(
            "Generated {} installments for loan {}",
            schedule.len(),
            loan_id
        );
        Ok(schedule)
    }

    pub fn get_schedule(&self, loan_id: &str) -> Result<Vec<RepaymentInstallment>, AppError> {
        Ok(self.get(loan_id)?.repayment_schedule)
    }

    pub fn get_balance_history(&self, loan_id: &str) -> Result<Vec<LoanBalanceHistory>, AppError> {
        Ok(self.get(loan_id)?.balance_history)
    }

    /// Every loan's deduction log, newest first.
    pub fn get_all_deductions(&self) -> Result<Vec<DeductionView>, AppError> {
        let mut deductions: Vec<DeductionView> = self
            .loans
            .find_all()?
            .into_iter()
            .flat_map(|loan| {
                let employee_id = loan.employee_id;
                loan.deductions.into_iter().map(move |deduction| DeductionView {
                    employee_id: employee_id.clone(),
                    deduction,
                })
            })
            .collect();

        deductions.sort_by(|a, b| {
            b.deduction
                .deducted_at
                .cmp(&a.deduction.deducted_at)
                .then_with(|| b.deduction.id.cmp(&a.deduction.id))
        });

        Ok(deductions)
    }

    pub fn get(&self, loan_id: &str) -> Result<Loan, AppError> {
        self.loans
            .find_by_id(loan_id)?
            .ok_or_else(|| AppError::not_found("Loan", loan_id))
    }

    pub fn loans_for_employee(&self, employee_id: &str) -> Result<Vec<Loan>, AppError> {
        self.loans.find_for_employee(employee_id)
    }

    fn transition<F>(&self, loan_id: &str, guard: F) -> Result<TransitionOutcome<Loan>, AppError>
    where
        F: FnOnce(&mut Loan) -> Option<GuardReason>,
    {
        self.loans.update(loan_id, |loan| {
            Ok(match guard(loan) {
                None => TransitionOutcome::applied(loan.clone()),
                Some(reason) => TransitionOutcome::unchanged(loan.clone(), reason),
            })
        })
    }
}

fn validate_net_pay(net_pay: &BigDecimal) -> Result<(), AppError> {
    if *net_pay < BigDecimal::zero() {
        return Err(AppError::validation("employeeNetPay cannot be negative"));
    }
    Ok(())
}

fn capped_amount(loan: &Loan, net_pay: &BigDecimal) -> BigDecimal {
    if loan.status != LoanStatus::Active {
        return BigDecimal::zero();
    }

    // Truncated to cents so rounding can never push past the cap
    let cap = (&loan.deduction_cap_percent * net_pay / BigDecimal::from(100)).with_scale(2);

    loan.monthly_deduction
        .clone()
        .min(loan.remaining_balance.clone())
        .min(cap)
}

fn apply_deduction(loan: &mut Loan, deduction_id: String, payslip_id: &str, requested: &BigDecimal) -> DeductionResult {
    let previous = loan.remaining_balance.clone();
    let applied = requested.clone().min(previous.clone());
    let new_balance = &previous - &applied;
    let now = Utc::now();

    loan.deductions.push(LoanDeduction {
        id: deduction_id,
        loan_id: loan.id.clone(),
        payslip_id: payslip_id.to_string(),
        amount: applied.clone(),
        deducted_at: now,
        remaining_after: new_balance.clone(),
    });
    loan.balance_history.push(LoanBalanceHistory {
        loan_id: loan.id.clone(),
        date: now,
        previous_balance: previous,
        deduction_amount: applied.clone(),
        new_balance: new_balance.clone(),
        payslip_id: payslip_id.to_string(),
    });

    if let Some(installment) = loan.repayment_schedule.iter_mut().find(|i| i.is_open()) {
        installment.paid = true;
    }

    loan.remaining_balance = new_balance;
    if loan.remaining_balance.is_zero() {
        loan.status = LoanStatus::Settled;
    }

    DeductionResult {
        loan_id: loan.id.clone(),
        payslip_id: payslip_id.to_string(),
        deducted: applied,
        skipped: false,
        reason: None,
        remaining_balance: loan.remaining_balance.clone(),
        status: loan.status,
    }
}

fn annotate_skip(loan: &mut Loan, reason: SkipReason) {
    if let Some(installment) = loan.repayment_schedule.iter_mut().find(|i| i.is_open()) {
        installment.skipped_reason = Some(reason);
    }
}

fn skipped(loan: &Loan, payslip_id: &str, reason: SkipReason) -> DeductionResult {
    DeductionResult {
        loan_id: loan.id.clone(),
        payslip_id: payslip_id.to_string(),
        deducted: BigDecimal::zero(),
        skipped: true,
        reason: Some(reason),
        remaining_balance: loan.remaining_balance.clone(),
        status: loan.status,
    }
}

/// `ceil(amount / monthlyDeduction)`, bounded by [`MAX_INSTALLMENTS`].
fn installment_count(amount: &BigDecimal, monthly: &BigDecimal) -> Result<u32, AppError> {
    (amount / monthly)
        .with_scale_round(0, RoundingMode::Ceiling)
        .to_u32()
        .filter(|count| *count <= MAX_INSTALLMENTS)
        .ok_or_else(|| {
            AppError::validation(format!(
                "repayment would take more than {} installments",
                MAX_INSTALLMENTS
            ))
        })
}

fn project_schedule(loan: &Loan) -> Result<Vec<RepaymentInstallment>, AppError> {
    let count = installment_count(&loan.amount, &loan.monthly_deduction)?;
    let start = loan.created_at.date_naive();
    let mut projected = loan.amount.clone();
    let mut schedule = Vec::with_capacity(count as usize);

    for number in 1..=count {
        let amount = loan.monthly_deduction.clone().min(projected.clone());
        let due_date = start.checked_add_months(Months::new(number)).ok_or_else(|| {
            AppError::internal_server_error_message(format!(
                "installment {} of loan {} falls outside the calendar",
                number, loan.id
            ))
        })?;

        projected = &projected - &amount;
        schedule.push(RepaymentInstallment {
            loan_id: loan.id.clone(),
            installment_number: number,
            due_date,
            amount,
            paid: false,
            skipped_reason: None,
        });
    }

    Ok(schedule)
}

fn log_result(result: &DeductionResult) {
    match result.reason {
        None => log::info!(
            "Deducted {} from loan {} for payslip {}, remaining {} ({})",
            result.deducted,
            result.loan_id,
            result.payslip_id,
            result.remaining_balance,
            result.status
        ),
        Some(reason) => log::warn!(
            "Skipped deduction on loan {} for payslip {}: {}",
            result.loan_id,
            result.payslip_id,
            reason
        ),
    }
}

fn log_outcome(action: &str, outcome: &TransitionOutcome<Loan>) {
    match outcome.reason {
        None => log::info!("Loan {} {}: now {}", outcome.record.id, action, outcome.record.status),
        Some(reason) => log::debug!(
            "Loan {} {} ignored ({}), status {}",
            outcome.record.id,
            action,
            reason,
            outcome.record.status
        ),
    }
}
