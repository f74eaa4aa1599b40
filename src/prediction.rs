use chrono::{Duration, NaiveDate};

use crate::models::{LoggedPeriod, OvulationWindow, PeriodRange, Prediction};

/// Days between ovulation and the onset of the next period.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Days on either side of the ovulation day that count as fertile.
pub const FERTILE_MARGIN_DAYS: i64 = 2;
/// Upper bound on up-front allocation; longer horizons grow as needed.
const PREALLOCATED_FORECASTS: usize = 64;

/// Forecast the next period and the ovulation window before it.
/// Requires at least 2 valid periods at distinct start dates.
pub fn predict(periods: &[LoggedPeriod]) -> Prediction {
    predict_with_horizon(periods, 1)
}

/// Like [`predict`], but forecasts `horizon` successive periods.
/// A horizon of 0 is treated as 1.
pub fn predict_with_horizon(periods: &[LoggedPeriod], horizon: usize) -> Prediction {
    let ranges: Vec<PeriodRange> = periods.iter().filter_map(LoggedPeriod::parse).collect();
    predict_ranges(&ranges, horizon)
}

/// Prediction over already validated ranges, in any order.
pub fn predict_ranges(ranges: &[PeriodRange], horizon: usize) -> Prediction {
    let Some(internals) = calc_internals(ranges) else {
        return Prediction::insufficient();
    };

    // Rounded once, half away from zero, so 27.5 days becomes 28.
    let step = internals.avg_cycle.round() as i64;
    let span = internals.last.duration_days() - 1;

    let horizon = horizon.max(1);
    let mut predicted_periods = Vec::with_capacity(horizon.min(PREALLOCATED_FORECASTS));
    let mut next_start = shift(internals.last.start, step);
    while let Some(start) = next_start {
        if predicted_periods.len() == horizon {
            break;
        }
        let Some(end) = shift(start, span) else {
            break;
        };
        predicted_periods.push(PeriodRange::new(start, end));
        next_start = shift(start, step);
    }

    let Some(first) = predicted_periods.first().copied() else {
        return Prediction::insufficient();
    };
    let predicted_ovulation = ovulation_window(first.start);
    if predicted_ovulation.is_none() {
        return Prediction::insufficient();
    }

    Prediction {
        predicted_period: Some(first),
        predicted_periods,
        predicted_ovulation,
        average_cycle_length: Some(internals.avg_cycle),
    }
}

/// Fertile window for a period expected to start on `period_start`.
pub fn ovulation_window(period_start: NaiveDate) -> Option<OvulationWindow> {
    let ovulation_day = shift(period_start, -LUTEAL_PHASE_DAYS)?;
    Some(OvulationWindow(
        shift(ovulation_day, -FERTILE_MARGIN_DAYS)?,
        shift(ovulation_day, FERTILE_MARGIN_DAYS)?,
    ))
}

/// Valid ranges sorted by start, then end, so equal starts still sort deterministically.
pub(crate) fn sorted_ranges(periods: &[LoggedPeriod]) -> Vec<PeriodRange> {
    let mut ranges: Vec<PeriodRange> = periods.iter().filter_map(LoggedPeriod::parse).collect();
    ranges.sort();
    ranges
}

/// Whole days between consecutive starts, dropping non-positive samples.
/// Expects `sorted` to be ordered as by [`sorted_ranges`].
pub(crate) fn cycle_lengths(sorted: &[PeriodRange]) -> Vec<i64> {
    sorted
        .windows(2)
        .map(|w| (w[1].start - w[0].start).num_days())
        .filter(|&days| days > 0)
        .collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn shift(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    day.checked_add_signed(Duration::try_days(days)?)
}

struct PredictionInternals {
    avg_cycle: f64,
    last: PeriodRange,
}

fn calc_internals(ranges: &[PeriodRange]) -> Option<PredictionInternals> {
    if ranges.len() < 2 {
        return None;
    }

    let mut sorted = ranges.to_vec();
    sorted.sort();

    let samples: Vec<f64> = cycle_lengths(&sorted).into_iter().map(|d| d as f64).collect();
    let avg_cycle = mean(&samples)?;
    let last = *sorted.last()?;

    Some(PredictionInternals { avg_cycle, last })
}
