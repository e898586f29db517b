use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub rule_set_id: String,
    pub shift_id: Option<String>,
    pub check_in: String,  // HH:mm
    pub check_out: String, // HH:mm
    pub worked_minutes: i64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub night_diff_hours: f64, // overlay, not part of total_hours
    pub total_hours: f64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
    pub is_holiday: bool,
    pub overtime_pending_approval: bool,
    pub segments: Vec<TimesheetSegment>,
    pub status: TimesheetStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetSegment {
    pub id: String,
    pub timesheet_id: String,
    pub segment_type: SegmentType,
    pub start_time: String,
    pub end_time: String,
    pub hours: f64,
    pub multiplier: f64,
}

/// Raw attendance pair plus the shift it is measured against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeTimesheetInput {
    pub employee_id: String,
    pub date: NaiveDate,
    pub rule_set_id: String,
    pub shift_id: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub shift_start: String,
    pub shift_end: String,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(default)]
    pub is_holiday: bool,
}

/// Per-period totals over an employee's non-rejected timesheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetSummary {
    pub employee_id: String,
    pub days: usize,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub night_diff_hours: f64,
    pub total_hours: f64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TimesheetStatus {
        Computed => "computed",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SegmentType {
        Regular => "regular",
        Overtime => "overtime",
        NightDiff => "night_diff",
    }
}
