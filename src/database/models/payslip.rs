use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub id: String,
    pub employee_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: BigDecimal,
    pub allowances: BigDecimal,
    pub statutory_deductions: StatutoryDeductions,
    pub loan_deduction: BigDecimal,
    pub net_pay: BigDecimal,
    pub status: PayslipStatus,
    pub issued_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub signed_at: Option<DateTime<Utc>>,
    pub signature_data: Option<String>,
    pub paid_confirmed_by: Option<String>,
    pub paid_confirmed_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub bank_reference_id: Option<String>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<String>,
}

impl Payslip {
    pub fn is_signed(&self) -> bool {
        self.signed_at.is_some()
    }
}

/// Figures supplied by the external government deduction calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatutoryDeductions {
    #[serde(default)]
    pub social_security: BigDecimal,
    #[serde(default)]
    pub health_insurance: BigDecimal,
    #[serde(default)]
    pub housing_fund: BigDecimal,
    #[serde(default)]
    pub withholding_tax: BigDecimal,
}

impl StatutoryDeductions {
    pub fn total(&self) -> BigDecimal {
        &self.social_security + &self.health_insurance + &self.housing_fund + &self.withholding_tax
    }

    pub fn has_negative(&self) -> bool {
        [
            &self.social_security,
            &self.health_insurance,
            &self.housing_fund,
            &self.withholding_tax,
        ]
        .iter()
        .any(|amount| **amount < BigDecimal::zero())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayslipInput {
    pub employee_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: BigDecimal,
    #[serde(default)]
    pub allowances: BigDecimal,
    #[serde(default)]
    pub statutory_deductions: StatutoryDeductions,
    #[serde(default)]
    pub loan_deduction: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub payment_method: PaymentMethod,
    pub bank_reference_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceConfirmationInput {
    pub confirmed_by: String,
    pub payment_method: PaymentMethod,
    pub bank_reference_id: Option<String>,
}

/// Payslips issued together, frozen once locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub payslip_ids: Vec<String>,
    pub locked: bool,
    pub locked_by: String,
    pub locked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRunInput {
    pub issued_at: DateTime<Utc>,
    pub locked_by: String,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PayslipStatus {
        Issued => "issued",
        Confirmed => "confirmed",
        Published => "published",
        Paid => "paid",
        Acknowledged => "acknowledged",
    }
}

impl PayslipStatus {
    /// Position in the forward-only lifecycle.
    pub fn rank(&self) -> u8 {
        match self {
            PayslipStatus::Issued => 0,
            PayslipStatus::Confirmed => 1,
            PayslipStatus::Published => 2,
            PayslipStatus::Paid => 3,
            PayslipStatus::Acknowledged => 4,
        }
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PaymentMethod {
        BankTransfer => "bank_transfer",
        Cash => "cash",
        Check => "check",
        EWallet => "e_wallet",
    }
}
