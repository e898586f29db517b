pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use services::{LoanService, PayslipService, TimesheetService};

use database::repositories::{
    LoanRepository, PayslipRepository, RuleSetRepository, TimesheetRepository,
};

/// Services shared by every worker. Clones share the same underlying store.
#[derive(Clone)]
pub struct AppState {
    pub timesheet_service: TimesheetService,
    pub payslip_service: PayslipService,
    pub loan_service: LoanService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            timesheet_service: TimesheetService::new(
                RuleSetRepository::new(),
                TimesheetRepository::new(),
                config.pay_rates.clone(),
            ),
            payslip_service: PayslipService::new(PayslipRepository::new()),
            loan_service: LoanService::new(
                LoanRepository::new(),
                config.default_deduction_cap_percent.clone(),
            ),
        }
    }
}
