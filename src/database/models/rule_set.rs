use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

pub const DEFAULT_RULE_SET_ID: &str = "ARS-DEFAULT";

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum RoundingPolicy {
        #[default]
        NoRounding => "none",
        Nearest15 => "nearest15",
        Nearest30 => "nearest30",
    }
}

impl RoundingPolicy {
    pub fn step_minutes(&self) -> Option<i64> {
        match self {
            RoundingPolicy::NoRounding => None,
            RoundingPolicy::Nearest15 => Some(15),
            RoundingPolicy::Nearest30 => Some(30),
        }
    }

    /// Quantizes non-negative worked minutes to the nearest step, halves up.
    pub fn apply(&self, minutes: i64) -> i64 {
        match self.step_minutes() {
            Some(step) => (minutes.max(0) + step / 2) / step * step,
            None => minutes.max(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRuleSet {
    pub id: String,
    pub name: String,
    pub standard_hours_per_day: f64,
    pub grace_minutes: i64,
    pub rounding_policy: RoundingPolicy,
    pub overtime_requires_approval: bool,
    pub night_diff_start: String, // HH:mm
    pub night_diff_end: String,   // HH:mm
    pub holiday_multiplier: f64,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRuleSet {
    /// Rule set used whenever a referenced id is unknown.
    pub fn fallback() -> Self {
        Self {
            id: DEFAULT_RULE_SET_ID.to_string(),
            name: "Default".to_string(),
            standard_hours_per_day: 8.0,
            grace_minutes: 10,
            rounding_policy: RoundingPolicy::Nearest15,
            overtime_requires_approval: false,
            night_diff_start: "22:00".to_string(),
            night_diff_end: "06:00".to_string(),
            holiday_multiplier: 2.0,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn standard_minutes(&self) -> i64 {
        (self.standard_hours_per_day * 60.0).round() as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRuleSetInput {
    pub name: String,
    pub standard_hours_per_day: f64,
    pub grace_minutes: i64,
    #[serde(default)]
    pub rounding_policy: RoundingPolicy,
    #[serde(default)]
    pub overtime_requires_approval: bool,
    pub night_diff_start: String,
    pub night_diff_end: String,
    #[serde(default = "default_holiday_multiplier")]
    pub holiday_multiplier: f64,
}

fn default_holiday_multiplier() -> f64 {
    2.0
}
