use std::sync::atomic::{AtomicU64, Ordering};

pub const RULE_SET_PREFIX: &str = "ARS";
pub const TIMESHEET_PREFIX: &str = "TSH";
pub const PAYSLIP_PREFIX: &str = "PSL";
pub const PAYROLL_RUN_PREFIX: &str = "RUN";
pub const LOAN_PREFIX: &str = "LON";
pub const LOAN_DEDUCTION_PREFIX: &str = "LDD";

/// Issues `PREFIX-00000001`, `PREFIX-00000002`, ...
///
/// Zero padding keeps lexicographic order equal to issuance order, which the
/// repositories rely on when they iterate a `BTreeMap` keyed by id.
#[derive(Debug)]
pub struct IdSequence {
    prefix: &'static str,
    last: AtomicU64,
}

impl IdSequence {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{:08}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_prefixed_and_ordered() {
        let seq = IdSequence::new(PAYSLIP_PREFIX);

        let first = seq.next_id();
        let second = seq.next_id();

        assert_eq!(first, "PSL-00000001");
        assert_eq!(second, "PSL-00000002");
        assert!(first < second);
    }
}
