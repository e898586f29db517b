pub mod loan;
pub mod payslip;
pub mod rule_set;
pub mod timesheet;

// Re-export all repositories for easy importing
pub use loan::LoanRepository;
pub use payslip::PayslipRepository;
pub use rule_set::RuleSetRepository;
pub use timesheet::TimesheetRepository;
