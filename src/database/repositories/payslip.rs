use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::database::ids::{IdSequence, PAYROLL_RUN_PREFIX, PAYSLIP_PREFIX};
use crate::database::models::{GuardReason, PayrollRun, Payslip, TransitionOutcome};
use crate::error::AppError;

#[derive(Debug, Default)]
struct PayslipTable {
    payslips: BTreeMap<String, Payslip>,
    runs: BTreeMap<String, PayrollRun>,
}

#[derive(Clone)]
pub struct PayslipRepository {
    table: Arc<RwLock<PayslipTable>>,
    payslip_ids: Arc<IdSequence>,
    run_ids: Arc<IdSequence>,
}

impl PayslipRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(PayslipTable::default())),
            payslip_ids: Arc::new(IdSequence::new(PAYSLIP_PREFIX)),
            run_ids: Arc::new(IdSequence::new(PAYROLL_RUN_PREFIX)),
        }
    }

    /// Insert a batch atomically, numbering each payslip as it lands. Ids
    /// are taken under the write lock so concurrent batches stay contiguous.
    pub fn insert_all(&self, mut payslips: Vec<Payslip>) -> Result<Vec<Payslip>, AppError> {
        let mut table = self.table.write()?;

        for payslip in &mut payslips {
            payslip.id = self.payslip_ids.next_id();
            table.payslips.insert(payslip.id.clone(), payslip.clone());
        }

        Ok(payslips)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Payslip>, AppError> {
        let table = self.table.read()?;
        Ok(table.payslips.get(id).cloned())
    }

    /// Payslips matching `predicate`, in issuance order.
    pub fn find_where<P>(&self, predicate: P) -> Result<Vec<Payslip>, AppError>
    where
        P: Fn(&Payslip) -> bool,
    {
        let table = self.table.read()?;
        Ok(table
            .payslips
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect())
    }

    /// Apply a guarded change under the write lock. `guard` either mutates the
    /// payslip and returns `None`, or leaves it alone and returns the reason.
    pub fn transition<F>(&self, id: &str, guard: F) -> Result<TransitionOutcome<Payslip>, AppError>
    where
        F: FnOnce(&mut Payslip) -> Option<GuardReason>,
    {
        let mut table = self.table.write()?;
        let payslip = table
            .payslips
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Payslip", id))?;

        Ok(match guard(payslip) {
            None => TransitionOutcome::applied(payslip.clone()),
            Some(reason) => TransitionOutcome::unchanged(payslip.clone(), reason),
        })
    }

    /// Snapshot every payslip sharing `issued_at` into a locked run.
    /// A timestamp that already has a run gets that run back untouched.
    pub fn lock_run(
        &self,
        issued_at: DateTime<Utc>,
        locked_by: &str,
    ) -> Result<TransitionOutcome<PayrollRun>, AppError> {
        let mut table = self.table.write()?;

        if let Some(existing) = table.runs.values().find(|r| r.issued_at == issued_at) {
            return Ok(TransitionOutcome::unchanged(
                existing.clone(),
                GuardReason::AlreadyLocked,
            ));
        }

        let payslip_ids: Vec<String> = table
            .payslips
            .values()
            .filter(|p| p.issued_at == issued_at)
            .map(|p| p.id.clone())
            .collect();

        if payslip_ids.is_empty() {
            return Err(AppError::validation(format!(
                "No payslips were issued at {}",
                issued_at.to_rfc3339()
            )));
        }

        let run = PayrollRun {
            id: self.run_ids.next_id(),
            issued_at,
            payslip_ids,
            locked: true,
            locked_by: locked_by.to_string(),
            locked_at: Utc::now(),
        };
        table.runs.insert(run.id.clone(), run.clone());

        Ok(TransitionOutcome::applied(run))
    }

    pub fn find_run(&self, id: &str) -> Result<Option<PayrollRun>, AppError> {
        let table = self.table.read()?;
        Ok(table.runs.get(id).cloned())
    }

    pub fn all_runs(&self) -> Result<Vec<PayrollRun>, AppError> {
        let table = self.table.read()?;
        Ok(table.runs.values().cloned().collect())
    }
}

impl Default for PayslipRepository {
    fn default() -> Self {
        Self::new()
    }
}
