use chrono::NaiveDate;

use crate::models::{CycleDay, DayInsight, DayKind, LoggedPeriod, PeriodRange, Prediction};
use crate::prediction::sorted_ranges;

/// Classify `date` against logged history and a prediction computed from it.
/// Logged periods win over the ovulation window, which wins over predicted periods.
pub fn describe_day(periods: &[LoggedPeriod], prediction: &Prediction, date: NaiveDate) -> DayInsight {
    let sorted = sorted_ranges(periods);

    let cycle_day = match sorted.last() {
        None => CycleDay::NoHistory,
        Some(last) if date < last.start => CycleDay::NotStarted,
        Some(last) => CycleDay::Day(day_of(last, date)),
    };

    let kind = if let Some(range) = sorted.iter().find(|r| r.contains(date)) {
        DayKind::Period {
            day: day_of(range, date),
        }
    } else if prediction
        .predicted_ovulation
        .is_some_and(|window| window.contains(date))
    {
        DayKind::PredictedOvulation
    } else if let Some(range) = prediction
        .predicted_periods
        .iter()
        .find(|r| r.contains(date))
    {
        DayKind::PredictedPeriod {
            day: day_of(range, date),
        }
    } else {
        DayKind::Unmarked
    };

    DayInsight {
        date,
        cycle_day,
        kind,
    }
}

/// 1-based position of `date` counted from the range start.
fn day_of(range: &PeriodRange, date: NaiveDate) -> i64 {
    (date - range.start).num_days() + 1
}
