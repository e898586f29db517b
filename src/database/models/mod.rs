pub mod loan;
pub(crate) mod macros;
pub mod outcome;
pub mod payslip;
pub mod rule_set;
pub mod timesheet;

// Re-export all models for easy importing
pub use loan::*;
pub use outcome::*;
pub use payslip::*;
pub use rule_set::*;
pub use timesheet::*;
