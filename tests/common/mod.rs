#![allow(dead_code)]

use actix_web::web;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::Name;
use std::env;

use paycore::database::models::{
    ComputeTimesheetInput, CreateLoanInput, DEFAULT_RULE_SET_ID, IssuePayslipInput, LoanType,
    StatutoryDeductions,
};
use paycore::{AppState, Config};

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh, empty store wired the way `main` wires it.
pub fn app_state() -> AppState {
    let config = Config::test_config().expect("test config");
    AppState::new(&config)
}

pub fn app_data() -> web::Data<AppState> {
    web::Data::new(app_state())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Random fixture data using the fake crate
pub struct MockData;

impl MockData {
    pub fn employee_id() -> String {
        format!("EMP-{}", (1000..99999).fake::<u32>())
    }

    pub fn employee_name() -> String {
        Name().fake()
    }

    /// Whole-currency gross pay between 20k and 60k
    pub fn gross_pay() -> BigDecimal {
        BigDecimal::from((20_000..60_000).fake::<i64>())
    }

    pub fn day_shift(employee_id: &str, day: NaiveDate, check_in: &str, check_out: &str) -> ComputeTimesheetInput {
        ComputeTimesheetInput {
            employee_id: employee_id.to_string(),
            date: day,
            rule_set_id: DEFAULT_RULE_SET_ID.to_string(),
            shift_id: None,
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            shift_start: "08:00".to_string(),
            shift_end: "17:00".to_string(),
            break_minutes: 60,
            is_holiday: false,
        }
    }

    pub fn payslip(employee_id: &str, gross_pay: BigDecimal) -> IssuePayslipInput {
        IssuePayslipInput {
            employee_id: employee_id.to_string(),
            period_start: date(2024, 6, 1),
            period_end: date(2024, 6, 30),
            gross_pay,
            allowances: BigDecimal::from(0),
            statutory_deductions: StatutoryDeductions {
                social_security: BigDecimal::from(500),
                health_insurance: BigDecimal::from(300),
                housing_fund: BigDecimal::from(100),
                withholding_tax: BigDecimal::from(1200),
            },
            loan_deduction: BigDecimal::from(0),
        }
    }

    pub fn loan(employee_id: &str, amount: i64, monthly: i64) -> CreateLoanInput {
        CreateLoanInput {
            employee_id: employee_id.to_string(),
            loan_type: LoanType::Salary,
            amount: BigDecimal::from(amount),
            monthly_deduction: BigDecimal::from(monthly),
            deduction_cap_percent: None,
        }
    }
}
