use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub employee_id: String,
    pub loan_type: LoanType,
    pub amount: BigDecimal, // principal
    pub monthly_deduction: BigDecimal,
    pub deduction_cap_percent: BigDecimal,
    pub remaining_balance: BigDecimal,
    pub status: LoanStatus,
    pub deductions: Vec<LoanDeduction>,
    pub balance_history: Vec<LoanBalanceHistory>,
    pub repayment_schedule: Vec<RepaymentInstallment>,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    pub fn has_deduction_for(&self, payslip_id: &str) -> bool {
        self.deductions.iter().any(|d| d.payslip_id == payslip_id)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.status, LoanStatus::Settled | LoanStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDeduction {
    pub id: String,
    pub loan_id: String,
    pub payslip_id: String,
    pub amount: BigDecimal,
    pub deducted_at: DateTime<Utc>,
    pub remaining_after: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBalanceHistory {
    pub loan_id: String,
    pub date: DateTime<Utc>,
    pub previous_balance: BigDecimal,
    pub deduction_amount: BigDecimal,
    pub new_balance: BigDecimal,
    pub payslip_id: String,
}

/// One projected installment. Not authoritative; regenerated on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentInstallment {
    pub loan_id: String,
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amount: BigDecimal,
    pub paid: bool,
    pub skipped_reason: Option<SkipReason>,
}

impl RepaymentInstallment {
    pub fn is_open(&self) -> bool {
        !self.paid && self.skipped_reason.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanInput {
    pub employee_id: String,
    pub loan_type: LoanType,
    pub amount: BigDecimal,
    pub monthly_deduction: BigDecimal,
    pub deduction_cap_percent: Option<BigDecimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionInput {
    pub payslip_id: String,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CappedDeductionInput {
    pub payslip_id: String,
    pub employee_net_pay: BigDecimal,
}

/// What a deduction call did to a loan. `skipped` calls leave it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionResult {
    pub loan_id: String,
    pub payslip_id: String,
    pub deducted: BigDecimal,
    pub skipped: bool,
    pub reason: Option<SkipReason>,
    pub remaining_balance: BigDecimal,
    pub status: LoanStatus,
}

/// Deduction log row annotated with the owning loan's employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionView {
    pub employee_id: String,
    #[serde(flatten)]
    pub deduction: LoanDeduction,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LoanStatus {
        Active => "active",
        Frozen => "frozen",
        Settled => "settled",
        Cancelled => "cancelled",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LoanType {
        Salary => "salary",
        Emergency => "emergency",
        Housing => "housing",
        CashAdvance => "cash_advance",
        Other => "other",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SkipReason {
        Frozen => "frozen",
        InsufficientNetPay => "insufficient_net_pay",
        Closed => "closed",
        AlreadyDeducted => "already_deducted",
    }
}
