use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::database::ids::{IdSequence, LOAN_DEDUCTION_PREFIX, LOAN_PREFIX};
use crate::database::models::Loan;
use crate::error::AppError;

/// Each loan exclusively owns its deduction log, balance history and schedule;
/// they are only reachable through `update`.
#[derive(Clone)]
pub struct LoanRepository {
    loans: Arc<RwLock<BTreeMap<String, Loan>>>,
    loan_ids: Arc<IdSequence>,
    deduction_ids: Arc<IdSequence>,
}

impl LoanRepository {
    pub fn new() -> Self {
        Self {
            loans: Arc::new(RwLock::new(BTreeMap::new())),
            loan_ids: Arc::new(IdSequence::new(LOAN_PREFIX)),
            deduction_ids: Arc::new(IdSequence::new(LOAN_DEDUCTION_PREFIX)),
        }
    }

    pub fn next_loan_id(&self) -> String {
        self.loan_ids.next_id()
    }

    pub fn next_deduction_id(&self) -> String {
        self.deduction_ids.next_id()
    }

    pub fn insert(&self, loan: Loan) -> Result<Loan, AppError> {
        let mut loans = self.loans.write()?;
        loans.insert(loan.id.clone(), loan.clone());
        Ok(loan)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Loan>, AppError> {
        let loans = self.loans.read()?;
        Ok(loans.get(id).cloned())
    }

    pub fn find_all(&self) -> Result<Vec<Loan>, AppError> {
        let loans = self.loans.read()?;
        Ok(loans.values().cloned().collect())
    }

    pub fn find_for_employee(&self, employee_id: &str) -> Result<Vec<Loan>, AppError> {
        let loans = self.loans.read()?;
        Ok(loans
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect())
    }

    /// Run `change` against one loan while holding the write lock, so the
    /// read-compute-commit cycle of a deduction cannot interleave with another.
    pub fn update<R, F>(&self, id: &str, change: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Loan) -> Result<R, AppError>,
    {
        let mut loans = self.loans.write()?;
        let loan = loans
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Loan", id))?;

        // Work on a copy so an error inside `change` leaves the loan untouched
        let mut draft = loan.clone();
        let result = change(&mut draft)?;
        *loan = draft;

        Ok(result)
    }
}

impl Default for LoanRepository {
    fn default() -> Self {
        Self::new()
    }
}
