use chrono::{Duration, NaiveDate};

use crate::models::PeriodRange;

/// Days assumed when a period is logged by tapping a single day.
pub const DEFAULT_PERIOD_DAYS: i64 = 5;

/// Un-log `day` if it falls inside a logged period, otherwise log a
/// default-length period starting on it.
pub fn toggle_day(ranges: &[PeriodRange], day: NaiveDate) -> Vec<PeriodRange> {
    if ranges.iter().any(|r| r.contains(day)) {
        let mut kept: Vec<PeriodRange> = ranges.iter().filter(|r| !r.contains(day)).copied().collect();
        kept.sort();
        return kept;
    }

    let end = day
        .checked_add_signed(Duration::days(DEFAULT_PERIOD_DAYS - 1))
        .unwrap_or(day);
    log_range(ranges, PeriodRange::new(day, end))
}

/// Insert `range`, replacing every logged period it overlaps.
pub fn log_range(ranges: &[PeriodRange], range: PeriodRange) -> Vec<PeriodRange> {
    let range = if range.end < range.start {
        PeriodRange::new(range.end, range.start)
    } else {
        range
    };

    let mut updated: Vec<PeriodRange> = ranges.iter().filter(|r| !r.overlaps(&range)).copied().collect();
    updated.push(range);
    updated.sort();
    updated
}

/// Rebuild period ranges from individually logged bleeding days.
/// Days at most two apart belong to the same period.
pub fn group_days(days: &[NaiveDate]) -> Vec<PeriodRange> {
    let mut days = days.to_vec();
    days.sort();
    days.dedup();

    let Some((&first, rest)) = days.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut end = first;

    for &day in rest {
        if (day - end).num_days() <= 2 {
            end = day;
        } else {
            ranges.push(PeriodRange::new(start, end));
            start = day;
            end = day;
        }
    }
    ranges.push(PeriodRange::new(start, end));

    ranges
}
