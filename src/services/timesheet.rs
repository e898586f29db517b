use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::config::PayRates;
use crate::database::models::{
    AttendanceRuleSet, AttendanceRuleSetInput, ComputeTimesheetInput, DEFAULT_RULE_SET_ID,
    GuardReason, SegmentType, Timesheet, TimesheetSegment, TimesheetStatus, TimesheetSummary,
    TransitionOutcome,
};
use crate::database::repositories::{RuleSetRepository, TimesheetRepository};
use crate::error::AppError;

pub const MINUTES_PER_DAY: i64 = 1440;

static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("clock pattern compiles"));

/// Parse a 24-hour `HH:mm` clock reading into minutes since midnight.
pub fn parse_clock(value: &str, field: &str) -> Result<i64, AppError> {
    let invalid = || AppError::validation(format!("{} must be HH:mm, got '{}'", field, value));

    let captures = CLOCK_PATTERN.captures(value).ok_or_else(invalid)?;
    let hours: i64 = captures[1].parse().map_err(|_| invalid())?;
    let minutes: i64 = captures[2].parse().map_err(|_| invalid())?;

    Ok(hours * 60 + minutes)
}

/// Format minutes (possibly past midnight) back into a wall-clock `HH:mm`.
pub fn format_clock(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

pub fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// Length of a clock window; `end <= start` means it runs past midnight.
pub fn window_length(start: i64, end: i64) -> i64 {
    if end > start {
        end - start
    } else {
        end + MINUTES_PER_DAY - start
    }
}

/// Overlaps of `[from, to)` with every daily occurrence of the night window.
///
/// `from`/`to` may extend into the next day (up to two days past midnight
/// once normalized), so occurrences from the previous day through two days
/// ahead are checked. Occurrences never overlap each other, so the pieces can
/// be summed without double counting.
pub fn night_overlaps(from: i64, to: i64, night_start: i64, night_end: i64) -> Vec<(i64, i64)> {
    let length = window_length(night_start, night_end);

    (-1..=2)
        .filter_map(|day| {
            let window_start = night_start + day * MINUTES_PER_DAY;
            let window_end = window_start + length;
            let lo = from.max(window_start);
            let hi = to.min(window_end);
            (hi > lo).then_some((lo, hi))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpan {
    pub segment_type: SegmentType,
    pub start: i64,
    pub end: i64,
    pub minutes: i64,
    pub multiplier: f64,
}

/// Minute buckets derived from one attendance pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DayComputation {
    pub worked_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
    pub night_diff_minutes: i64,
    pub late_minutes: i64,
    pub undertime_minutes: i64,
    pub spans: Vec<SegmentSpan>,
}

pub fn compute_day(
    input: &ComputeTimesheetInput,
    rules: &AttendanceRuleSet,
    rates: &PayRates,
) -> Result<DayComputation, AppError> {
    if input.break_minutes < 0 {
        return Err(AppError::validation("breakMinutes cannot be negative"));
    }

    let mut check_in = parse_clock(&input.check_in, "checkIn")?;
    let mut check_out = parse_clock(&input.check_out, "checkOut")?;
    let shift_start = parse_clock(&input.shift_start, "shiftStart")?;
    let mut shift_end = parse_clock(&input.shift_end, "shiftEnd")?;
    let night_start = parse_clock(&rules.night_diff_start, "nightDiffStart")?;
    let night_end = parse_clock(&rules.night_diff_end, "nightDiffEnd")?;

    if shift_end <= shift_start {
        shift_end += MINUTES_PER_DAY;
    }
    if check_out <= check_in {
        check_out += MINUTES_PER_DAY;
    }
    // Overnight shift joined after midnight: the readings belong to the next day
    if shift_end > MINUTES_PER_DAY && check_in < shift_end - MINUTES_PER_DAY {
        check_in += MINUTES_PER_DAY;
        check_out += MINUTES_PER_DAY;
    }

    let raw_worked = (check_out - check_in - input.break_minutes).max(0);
    let worked_minutes = rules.rounding_policy.apply(raw_worked);

    let raw_late = check_in - shift_start;
    let late_minutes = if raw_late > rules.grace_minutes {
        raw_late
    } else {
        0
    };
    let undertime_minutes = if check_out < shift_end {
        shift_end - check_out
    } else {
        0
    };

    let regular_minutes = worked_minutes.min(rules.standard_minutes().max(0));
    let overtime_minutes = worked_minutes - regular_minutes;

    let overlaps = night_overlaps(check_in, check_out, night_start, night_end);
    let night_diff_minutes = overlaps
        .iter()
        .map(|(lo, hi)| hi - lo)
        .sum::<i64>()
        .min(worked_minutes)
        .min(window_length(night_start, night_end))
        .max(0);

    let holiday_factor = if input.is_holiday {
        rules.holiday_multiplier
    } else {
        1.0
    };

    let mut spans = Vec::new();
    let regular_end = check_in + regular_minutes;
    if regular_minutes > 0 {
        spans.push(SegmentSpan {
            segment_type: SegmentType::Regular,
            start: check_in,
            end: regular_end,
            minutes: regular_minutes,
            multiplier: rates.regular * holiday_factor,
        });
    }
    if overtime_minutes > 0 {
        spans.push(SegmentSpan {
            segment_type: SegmentType::Overtime,
            start: regular_end,
            end: regular_end + overtime_minutes,
            minutes: overtime_minutes,
            multiplier: rates.overtime * holiday_factor,
        });
    }

    let mut night_budget = night_diff_minutes;
    for (lo, hi) in overlaps {
        let minutes = (hi - lo).min(night_budget);
        if minutes <= 0 {
            break;
        }
        night_budget -= minutes;
        spans.push(SegmentSpan {
            segment_type: SegmentType::NightDiff,
            start: lo,
            end: lo + minutes,
            minutes,
            multiplier: rates.night_diff,
        });
    }

    Ok(DayComputation {
        worked_minutes,
        regular_minutes,
        overtime_minutes,
        night_diff_minutes,
        late_minutes,
        undertime_minutes,
        spans,
    })
}

fn validate_rule_set_input(input: &AttendanceRuleSetInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if !(input.standard_hours_per_day > 0.0 && input.standard_hours_per_day <= 24.0) {
        return Err(AppError::validation(
            "standardHoursPerDay must be within (0, 24]",
        ));
    }
    if input.grace_minutes < 0 {
        return Err(AppError::validation("graceMinutes cannot be negative"));
    }
    if input.holiday_multiplier <= 0.0 {
        return Err(AppError::validation("holidayMultiplier must be positive"));
    }
    parse_clock(&input.night_diff_start, "nightDiffStart")?;
    parse_clock(&input.night_diff_end, "nightDiffEnd")?;
    Ok(())
}

#[derive(Clone)]
pub struct TimesheetService {
    rule_sets: RuleSetRepository,
    timesheets: TimesheetRepository,
    rates: PayRates,
}

impl TimesheetService {
    pub fn new(rule_sets: RuleSetRepository, timesheets: TimesheetRepository, rates: PayRates) -> Self {
        Self {
            rule_sets,
            timesheets,
            rates,
        }
    }

    pub fn create_rule_set(&self, input: AttendanceRuleSetInput) -> Result<AttendanceRuleSet, AppError> {
        validate_rule_set_input(&input)?;

        let rule_set = self.rule_sets.insert(AttendanceRuleSet {
            id: self.rule_sets.next_id(),
            name: input.name,
            standard_hours_per_day: input.standard_hours_per_day,
            grace_minutes: input.grace_minutes,
            rounding_policy: input.rounding_policy,
            overtime_requires_approval: input.overtime_requires_approval,
            night_diff_start: input.night_diff_start,
            night_diff_end: input.night_diff_end,
            holiday_multiplier: input.holiday_multiplier,
            created_at: Utc::now(),
        })?;

        log::info!("Created rule set {} ({})", rule_set.id, rule_set.name);
        Ok(rule_set)
    }

    /// Edit a rule set no timesheet has been computed against yet.
    pub fn update_rule_set(
        &self,
        id: &str,
        input: AttendanceRuleSetInput,
    ) -> Result<AttendanceRuleSet, AppError> {
        validate_rule_set_input(&input)?;

        let current = self
            .rule_sets
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Rule set", id))?;

        let rule_set = self.rule_sets.replace(AttendanceRuleSet {
            name: input.name,
            standard_hours_per_day: input.standard_hours_per_day,
            grace_minutes: input.grace_minutes,
            rounding_policy: input.rounding_policy,
            overtime_requires_approval: input.overtime_requires_approval,
            night_diff_start: input.night_diff_start,
            night_diff_end: input.night_diff_end,
            holiday_multiplier: input.holiday_multiplier,
            ..current
        })?;

        log::info!("Updated rule set {}", rule_set.id);
        Ok(rule_set)
    }

    pub fn get_rule_set(&self, id: &str) -> Result<AttendanceRuleSet, AppError> {
        if id == DEFAULT_RULE_SET_ID {
            return Ok(AttendanceRuleSet::fallback());
        }
        self.rule_sets
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Rule set", id))
    }

    /// Compute (or recompute) the timesheet for one attendance pair.
    pub fn compute(&self, input: ComputeTimesheetInput) -> Result<Timesheet, AppError> {
        if input.employee_id.trim().is_empty() {
            return Err(AppError::validation("employeeId is required"));
        }

        if let Some(existing) = self.timesheets.find_for_day(&input.employee_id, input.date)? {
            if existing.status != TimesheetStatus::Computed {
                return Err(AppError::Conflict(format!(
                    "Timesheet {} is {} and can no longer be recomputed",
                    existing.id, existing.status
                )));
            }
        }

        let (rules, day) = self.rule_sets.use_rule_set(&input.rule_set_id, |rules| {
            let day = compute_day(&input, rules, &self.rates)?;
            Ok((rules.clone(), day))
        })?;

        let computed_at = Utc::now();
        let (timesheet, replaced) =
            self.timesheets
                .save_computed(&input.employee_id, input.date, |id| {
                    let segments = day
                        .spans
                        .iter()
                        .map(|span| TimesheetSegment {
                            id: Uuid::new_v4().to_string(),
                            timesheet_id: id.clone(),
                            segment_type: span.segment_type,
                            start_time: format_clock(span.start),
                            end_time: format_clock(span.end),
                            hours: minutes_to_hours(span.minutes),
                            multiplier: span.multiplier,
                        })
                        .collect();

                    let regular_hours = minutes_to_hours(day.regular_minutes);
                    let overtime_hours = minutes_to_hours(day.overtime_minutes);

                    Timesheet {
                        id,
                        employee_id: input.employee_id.clone(),
                        date: input.date,
                        rule_set_id: rules.id.clone(),
                        shift_id: input.shift_id.clone(),
                        check_in: input.check_in.clone(),
                        check_out: input.check_out.clone(),
                        worked_minutes: day.worked_minutes,
                        regular_hours,
                        overtime_hours,
                        night_diff_hours: minutes_to_hours(day.night_diff_minutes),
                        total_hours: regular_hours + overtime_hours,
                        late_minutes: day.late_minutes,
                        undertime_minutes: day.undertime_minutes,
                        is_holiday: input.is_holiday,
                        overtime_pending_approval: day.overtime_minutes > 0
                            && rules.overtime_requires_approval,
                        segments,
                        status: TimesheetStatus::Computed,
                        approved_by: None,
                        approved_at: None,
                        computed_at,
                    }
                })?;

        log::info!(
            "{} timesheet {} for {} on {}: {}h regular, {}h overtime",
            if replaced { "Recomputed" } else { "Computed" },
            timesheet.id,
            timesheet.employee_id,
            timesheet.date,
            timesheet.regular_hours,
            timesheet.overtime_hours
        );

        Ok(timesheet)
    }

    pub fn get(&self, id: &str) -> Result<Timesheet, AppError> {
        self.timesheets
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Timesheet", id))
    }

    pub fn for_employee(
        &self,
        employee_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Timesheet>, AppError> {
        self.timesheets.find_for_employee(employee_id, from, to)
    }

    /// Period totals handed to payroll aggregation. Rejected days are excluded.
    pub fn summarize(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TimesheetSummary, AppError> {
        if to < from {
            return Err(AppError::validation("period end precedes period start"));
        }

        let timesheets = self
            .timesheets
            .find_for_employee(employee_id, Some(from), Some(to))?;

        let summary = timesheets
            .iter()
            .filter(|t| t.status != TimesheetStatus::Rejected)
            .fold(
                TimesheetSummary {
                    employee_id: employee_id.to_string(),
                    ..Default::default()
                },
                |mut acc, t| {
                    acc.days += 1;
                    acc.regular_hours += t.regular_hours;
                    acc.overtime_hours += t.overtime_hours;
                    acc.night_diff_hours += t.night_diff_hours;
                    acc.late_minutes += t.late_minutes;
                    acc.undertime_minutes += t.undertime_minutes;
                    acc
                },
            );

        let regular_hours = (summary.regular_hours * 100.0).round() / 100.0;
        let overtime_hours = (summary.overtime_hours * 100.0).round() / 100.0;

        Ok(TimesheetSummary {
            regular_hours,
            overtime_hours,
            night_diff_hours: (summary.night_diff_hours * 100.0).round() / 100.0,
            total_hours: regular_hours + overtime_hours,
            ..summary
        })
    }

    pub fn submit(&self, id: &str) -> Result<TransitionOutcome<Timesheet>, AppError> {
        let outcome = self.timesheets.transition(id, |timesheet| {
            if timesheet.status != TimesheetStatus::Computed {
                return Some(GuardReason::InvalidState);
            }
            timesheet.status = TimesheetStatus::Submitted;
            None
        })?;

        log_outcome("submit", &outcome);
        Ok(outcome)
    }

    pub fn approve(&self, id: &str, approver_id: &str) -> Result<TransitionOutcome<Timesheet>, AppError> {
        require_actor(approver_id, "approverId")?;

        let outcome = self.timesheets.transition(id, |timesheet| {
            if timesheet.status != TimesheetStatus::Submitted {
                return Some(GuardReason::InvalidState);
            }
            timesheet.status = TimesheetStatus::Approved;
            timesheet.approved_by = Some(approver_id.to_string());
            timesheet.approved_at = Some(Utc::now());
            timesheet.overtime_pending_approval = false;
            None
        })?;

        log_outcome("approve", &outcome);
        Ok(outcome)
    }

    pub fn reject(&self, id: &str, approver_id: &str) -> Result<TransitionOutcome<Timesheet>, AppError> {
        require_actor(approver_id, "approverId")?;

        let outcome = self.timesheets.transition(id, |timesheet| {
            if timesheet.status != TimesheetStatus::Submitted {
                return Some(GuardReason::InvalidState);
            }
            timesheet.status = TimesheetStatus::Rejected;
            timesheet.approved_by = Some(approver_id.to_string());
            timesheet.approved_at = Some(Utc::now());
            None
        })?;

        log_outcome("reject", &outcome);
        Ok(outcome)
    }
}

fn require_actor(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn log_outcome(action: &str, outcome: &TransitionOutcome<Timesheet>) {
    match outcome.reason {
        None => log::info!(
            "Timesheet {} {}: now {}",
            outcome.record.id,
            action,
            outcome.record.status
        ),
        Some(reason) => log::debug!(
            "Timesheet {} {} ignored ({}), status {}",
            outcome.record.id,
            action,
            reason,
            outcome.record.status
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::RoundingPolicy;
    use pretty_assertions::assert_eq;

    fn rules(rounding: RoundingPolicy) -> AttendanceRuleSet {
        AttendanceRuleSet {
            rounding_policy: rounding,
            ..AttendanceRuleSet::fallback()
        }
    }

    fn input(check_in: &str, check_out: &str, shift_start: &str, shift_end: &str, break_minutes: i64) -> ComputeTimesheetInput {
        ComputeTimesheetInput {
            employee_id: "EMP-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            rule_set_id: DEFAULT_RULE_SET_ID.to_string(),
            shift_id: None,
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            shift_start: shift_start.to_string(),
            shift_end: shift_end.to_string(),
            break_minutes,
            is_holiday: false,
        }
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00", "t").unwrap(), 0);
        assert_eq!(parse_clock("08:20", "t").unwrap(), 500);
        assert_eq!(parse_clock("23:59", "t").unwrap(), 1439);

        for bad in ["24:00", "8:00", "08:60", "0800", "", "ab:cd", " 08:00"] {
            assert!(
                matches!(parse_clock(bad, "t"), Err(AppError::Validation(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_format_clock_wraps_past_midnight() {
        assert_eq!(format_clock(1800), "06:00");
        assert_eq!(format_clock(1320), "22:00");
        assert_eq!(format_clock(5), "00:05");
    }

    #[test]
    fn test_regular_day_with_break() {
        let day = compute_day(
            &input("08:00", "17:00", "08:00", "17:00", 60),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.worked_minutes, 480);
        assert_eq!(day.regular_minutes, 480);
        assert_eq!(day.overtime_minutes, 0);
        assert_eq!(day.late_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);
        assert_eq!(day.night_diff_minutes, 0);
        assert_eq!(day.spans.len(), 1);
    }

    #[test]
    fn test_overtime_split() {
        let day = compute_day(
            &input("08:00", "20:00", "08:00", "17:00", 60),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.regular_minutes, 480);
        assert_eq!(day.overtime_minutes, 180);
        let overtime = &day.spans[1];
        assert_eq!(overtime.segment_type, SegmentType::Overtime);
        assert_eq!(overtime.multiplier, 1.25);
        assert_eq!((overtime.start, overtime.end), (960, 1140));
    }

    #[test]
    fn test_grace_period_boundary() {
        let rules = rules(RoundingPolicy::NoRounding);
        let rates = PayRates::default();

        let late = |check_in: &str| {
            compute_day(&input(check_in, "17:00", "08:00", "17:00", 0), &rules, &rates)
                .unwrap()
                .late_minutes
        };

        assert_eq!(late("07:45"), 0);
        assert_eq!(late("08:08"), 0);
        assert_eq!(late("08:10"), 0);
        assert_eq!(late("08:11"), 11);
        assert_eq!(late("08:20"), 20);
    }

    #[test]
    fn test_undertime() {
        let day = compute_day(
            &input("08:00", "16:15", "08:00", "17:00", 0),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.undertime_minutes, 45);
    }

    #[test]
    fn test_overnight_shift_night_window_is_not_exceeded() {
        let day = compute_day(
            &input("21:50", "06:10", "22:00", "06:00", 0),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.worked_minutes, 500);
        assert_eq!(day.night_diff_minutes, 480);
        assert_eq!(day.late_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);

        let night: Vec<_> = day
            .spans
            .iter()
            .filter(|s| s.segment_type == SegmentType::NightDiff)
            .collect();
        assert_eq!(night.len(), 1);
        assert_eq!(night[0].minutes, 480);
        assert_eq!(night[0].multiplier, 1.1);
    }

    #[test]
    fn test_overnight_check_in_after_midnight() {
        let day = compute_day(
            &input("00:30", "06:00", "22:00", "06:00", 0),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.late_minutes, 150);
        assert_eq!(day.undertime_minutes, 0);
        assert_eq!(day.worked_minutes, 330);
        assert_eq!(day.night_diff_minutes, 330);
    }

    #[test]
    fn test_early_morning_counts_towards_night_diff() {
        let day = compute_day(
            &input("05:00", "14:00", "05:00", "14:00", 60),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.night_diff_minutes, 60);
    }

    #[test]
    fn test_day_shift_outside_window_has_no_night_diff() {
        for (check_in, check_out) in [("08:00", "17:00"), ("06:00", "22:00")] {
            let day = compute_day(
                &input(check_in, check_out, "08:00", "17:00", 0),
                &rules(RoundingPolicy::NoRounding),
                &PayRates::default(),
            )
            .unwrap();
            assert_eq!(day.night_diff_minutes, 0, "{}-{}", check_in, check_out);
        }
    }

    #[test]
    fn test_night_diff_never_exceeds_worked_minutes() {
        let day = compute_day(
            &input("22:00", "02:00", "22:00", "06:00", 120),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.worked_minutes, 120);
        assert_eq!(day.night_diff_minutes, 120);
    }

    #[test]
    fn test_rounding_applies_to_worked_minutes() {
        let day = compute_day(
            &input("08:00", "16:08", "08:00", "17:00", 0),
            &rules(RoundingPolicy::Nearest15),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.worked_minutes, 495);
        assert_eq!(day.regular_minutes + day.overtime_minutes, day.worked_minutes);
    }

    #[test]
    fn test_break_longer_than_attendance_clamps_to_zero() {
        let day = compute_day(
            &input("08:00", "08:30", "08:00", "17:00", 60),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        )
        .unwrap();

        assert_eq!(day.worked_minutes, 0);
        assert_eq!(day.regular_minutes, 0);
        assert_eq!(day.overtime_minutes, 0);
        assert!(day.spans.is_empty());
    }

    #[test]
    fn test_holiday_multiplier_scales_regular_and_overtime() {
        let mut holiday = input("08:00", "19:00", "08:00", "17:00", 60);
        holiday.is_holiday = true;

        let day = compute_day(&holiday, &rules(RoundingPolicy::NoRounding), &PayRates::default())
            .unwrap();

        assert_eq!(day.spans[0].multiplier, 2.0);
        assert_eq!(day.spans[1].multiplier, 2.5);
    }

    #[test]
    fn test_negative_break_is_rejected() {
        let result = compute_day(
            &input("08:00", "17:00", "08:00", "17:00", -5),
            &rules(RoundingPolicy::NoRounding),
            &PayRates::default(),
        );

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_hour_buckets_always_add_up() {
        let rules = rules(RoundingPolicy::Nearest15);
        let rates = PayRates::default();

        for check_in in (0..MINUTES_PER_DAY).step_by(97) {
            for check_out in (0..MINUTES_PER_DAY).step_by(89) {
                let day = compute_day(
                    &input(&format_clock(check_in), &format_clock(check_out), "22:00", "06:00", 30),
                    &rules,
                    &rates,
                )
                .unwrap();

                assert!(day.regular_minutes >= 0);
                assert!(day.overtime_minutes >= 0);
                assert_eq!(day.regular_minutes + day.overtime_minutes, day.worked_minutes);
                assert!(day.late_minutes >= 0);
                assert!(day.night_diff_minutes >= 0);
                assert!(day.night_diff_minutes <= day.worked_minutes.min(480));
            }
        }
    }
}
