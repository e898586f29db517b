pub mod loan;
pub mod payslip;
pub mod timesheet;

pub use loan::LoanService;
pub use payslip::PayslipService;
pub use timesheet::TimesheetService;
