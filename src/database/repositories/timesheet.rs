use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::database::ids::{IdSequence, TIMESHEET_PREFIX};
use crate::database::models::{GuardReason, Timesheet, TimesheetStatus, TransitionOutcome};
use crate::error::AppError;

#[derive(Debug, Default)]
struct TimesheetTable {
    timesheets: BTreeMap<String, Timesheet>,
    // (employee_id, date) -> timesheet id
    by_day: HashMap<(String, NaiveDate), String>,
}

#[derive(Clone)]
pub struct TimesheetRepository {
    table: Arc<RwLock<TimesheetTable>>,
    ids: Arc<IdSequence>,
}

impl TimesheetRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(TimesheetTable::default())),
            ids: Arc::new(IdSequence::new(TIMESHEET_PREFIX)),
        }
    }

    /// Insert or replace the timesheet for `(employee_id, date)`.
    ///
    /// `build` receives the id to use: the existing one when a `computed`
    /// timesheet is replaced in place, a fresh one otherwise. Anything past
    /// `computed` is frozen and yields `Conflict`.
    pub fn save_computed<F>(
        &self,
        employee_id: &str,
        date: NaiveDate,
        build: F,
    ) -> Result<(Timesheet, bool), AppError>
    where
        F: FnOnce(String) -> Timesheet,
    {
        let mut table = self.table.write()?;
        let key = (employee_id.to_string(), date);

        let existing_id = match table.by_day.get(&key) {
            Some(id) => {
                let existing = table
                    .timesheets
                    .get(id)
                    .ok_or_else(|| AppError::internal_server_error_message("timesheet index out of sync"))?;
                if existing.status != TimesheetStatus::Computed {
                    return Err(AppError::Conflict(format!(
                        "Timesheet {} is {} and can no longer be recomputed",
                        existing.id, existing.status
                    )));
                }
                Some(id.clone())
            }
            None => None,
        };

        let replaced = existing_id.is_some();
        let id = existing_id.unwrap_or_else(|| self.ids.next_id());
        let timesheet = build(id.clone());

        table.by_day.insert(key, id.clone());
        table.timesheets.insert(id, timesheet.clone());

        Ok((timesheet, replaced))
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Timesheet>, AppError> {
        let table = self.table.read()?;
        Ok(table.timesheets.get(id).cloned())
    }

    pub fn find_for_day(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Timesheet>, AppError> {
        let table = self.table.read()?;
        Ok(table
            .by_day
            .get(&(employee_id.to_string(), date))
            .and_then(|id| table.timesheets.get(id))
            .cloned())
    }

    /// Timesheets for one employee, oldest date first, optionally bounded.
    pub fn find_for_employee(
        &self,
        employee_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Timesheet>, AppError> {
        let table = self.table.read()?;

        let mut timesheets: Vec<Timesheet> = table
            .timesheets
            .values()
            .filter(|t| t.employee_id == employee_id)
            .filter(|t| from.is_none_or(|from| t.date >= from))
            .filter(|t| to.is_none_or(|to| t.date <= to))
            .cloned()
            .collect();
        timesheets.sort_by_key(|t| t.date);

        Ok(timesheets)
    }

    /// Apply a guarded change under the write lock. `guard` either mutates the
    /// timesheet and returns `None`, or leaves it alone and returns the reason.
    pub fn transition<F>(&self, id: &str, guard: F) -> Result<TransitionOutcome<Timesheet>, AppError>
    where
        F: FnOnce(&mut Timesheet) -> Option<GuardReason>,
    {
        let mut table = self.table.write()?;
        let timesheet = table
            .timesheets
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Timesheet", id))?;

        Ok(match guard(timesheet) {
            None => TransitionOutcome::applied(timesheet.clone()),
            Some(reason) => TransitionOutcome::unchanged(timesheet.clone(), reason),
        })
    }
}

impl Default for TimesheetRepository {
    fn default() -> Self {
        Self::new()
    }
}
