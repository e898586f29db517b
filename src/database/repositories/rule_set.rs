use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::database::ids::{IdSequence, RULE_SET_PREFIX};
use crate::database::models::{AttendanceRuleSet, DEFAULT_RULE_SET_ID};
use crate::error::AppError;

#[derive(Debug, Default)]
struct RuleSetTable {
    rule_sets: HashMap<String, AttendanceRuleSet>,
    referenced: HashSet<String>,
}

#[derive(Clone)]
pub struct RuleSetRepository {
    table: Arc<RwLock<RuleSetTable>>,
    ids: Arc<IdSequence>,
}

impl RuleSetRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(RuleSetTable::default())),
            ids: Arc::new(IdSequence::new(RULE_SET_PREFIX)),
        }
    }

    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    pub fn insert(&self, rule_set: AttendanceRuleSet) -> Result<AttendanceRuleSet, AppError> {
        let mut table = self.table.write()?;
        table
            .rule_sets
            .insert(rule_set.id.clone(), rule_set.clone());
        Ok(rule_set)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<AttendanceRuleSet>, AppError> {
        let table = self.table.read()?;
        Ok(table.rule_sets.get(id).cloned())
    }

    /// Run `compute` against the rule set `id` and, if it succeeds, pin that
    /// rule set against later edits. Unknown ids resolve to the built-in
    /// fallback instead of failing.
    pub fn use_rule_set<R, F>(&self, id: &str, compute: F) -> Result<R, AppError>
    where
        F: FnOnce(&AttendanceRuleSet) -> Result<R, AppError>,
    {
        let mut table = self.table.write()?;

        let rule_set = match table.rule_sets.get(id) {
            Some(rule_set) => rule_set.clone(),
            None => {
                log::warn!(
                    "Rule set {} not found, falling back to {}",
                    id,
                    DEFAULT_RULE_SET_ID
                );
                AttendanceRuleSet::fallback()
            }
        };

        let result = compute(&rule_set)?;
        table.referenced.insert(rule_set.id);

        Ok(result)
    }

    pub fn is_referenced(&self, id: &str) -> Result<bool, AppError> {
        let table = self.table.read()?;
        Ok(table.referenced.contains(id))
    }

    /// Replace an unreferenced rule set. Referenced ones are immutable.
    pub fn replace(&self, rule_set: AttendanceRuleSet) -> Result<AttendanceRuleSet, AppError> {
        let mut table = self.table.write()?;

        if !table.rule_sets.contains_key(&rule_set.id) {
            return Err(AppError::not_found("Rule set", &rule_set.id));
        }
        if table.referenced.contains(&rule_set.id) {
            return Err(AppError::Conflict(format!(
                "Rule set {} is referenced by computed timesheets and cannot change",
                rule_set.id
            )));
        }

        table
            .rule_sets
            .insert(rule_set.id.clone(), rule_set.clone());
        Ok(rule_set)
    }
}

impl Default for RuleSetRepository {
    fn default() -> Self {
        Self::new()
    }
}
