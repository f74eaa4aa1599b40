use std::ops::RangeInclusive;

use crate::models::{CycleAssessment, CycleMetrics, LoggedPeriod, RangeStatus, Regularity};
use crate::prediction::{cycle_lengths, mean, sorted_ranges};

pub const NORMAL_CYCLE_DAYS: RangeInclusive<i64> = 21..=35;
pub const NORMAL_PERIOD_DAYS: RangeInclusive<i64> = 2..=7;
/// Spread between the longest and shortest cycle above which history counts as irregular.
pub const IRREGULAR_VARIATION_DAYS: i64 = 7;
/// Fewer periods than this give too few samples to judge regularity.
const MIN_PERIODS_FOR_REGULARITY: usize = 3;

/// Summarise cycle and period lengths over every entry whose dates parse.
pub fn cycle_metrics(periods: &[LoggedPeriod]) -> CycleMetrics {
    let sorted = sorted_ranges(periods);

    let Some(last) = sorted.last().copied() else {
        return CycleMetrics::default();
    };

    let lengths = cycle_lengths(&sorted);
    let durations: Vec<f64> = sorted.iter().map(|r| r.duration_days() as f64).collect();

    let (previous_cycle_length, previous_period_duration) = match sorted.as_slice() {
        [.., prev, last] => {
            let gap = (last.start - prev.start).num_days();
            ((gap > 0).then_some(gap), Some(last.duration_days()))
        }
        _ => (None, None),
    };

    let shortest_cycle = lengths.iter().copied().min();
    let longest_cycle = lengths.iter().copied().max();
    let samples: Vec<f64> = lengths.iter().map(|&d| d as f64).collect();

    CycleMetrics {
        total_periods: sorted.len(),
        average_cycle_length: mean(&samples),
        average_period_length: mean(&durations),
        shortest_cycle,
        longest_cycle,
        previous_cycle_length,
        previous_period_duration,
        cycle_variation: shortest_cycle.zip(longest_cycle).map(|(lo, hi)| hi - lo),
        last_period_start: Some(last.start),
        last_period_end: Some(last.end),
    }
}

/// Grade the most recent cycle against population norms.
pub fn assess(metrics: &CycleMetrics) -> CycleAssessment {
    let regularity = match metrics.cycle_variation {
        _ if metrics.total_periods < MIN_PERIODS_FOR_REGULARITY => Regularity::Unknown,
        None => Regularity::Unknown,
        Some(v) if v > IRREGULAR_VARIATION_DAYS => Regularity::Irregular,
        Some(_) => Regularity::Regular,
    };

    CycleAssessment {
        cycle_length: range_status(metrics.previous_cycle_length, &NORMAL_CYCLE_DAYS),
        period_duration: range_status(metrics.previous_period_duration, &NORMAL_PERIOD_DAYS),
        regularity,
    }
}

fn range_status(value: Option<i64>, normal: &RangeInclusive<i64>) -> RangeStatus {
    match value {
        None => RangeStatus::Unknown,
        Some(v) if normal.contains(&v) => RangeStatus::Normal,
        Some(_) => RangeStatus::Abnormal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn logged(start: &str, end: &str) -> LoggedPeriod {
        LoggedPeriod::new(start, end)
    }

    #[test]
    fn empty_history_has_no_stats() {
        let metrics = cycle_metrics(&[]);
        assert_eq!(metrics, CycleMetrics::default());
        let assessment = assess(&metrics);
        assert_eq!(assessment.cycle_length, RangeStatus::Unknown);
        assert_eq!(assessment.period_duration, RangeStatus::Unknown);
        assert_eq!(assessment.regularity, Regularity::Unknown);
    }

    #[test]
    fn single_period_reports_last_dates_only() {
        let metrics = cycle_metrics(&[logged("2024-01-01", "2024-01-05")]);
        assert_eq!(metrics.total_periods, 1);
        assert_eq!(metrics.average_period_length, Some(5.0));
        assert_eq!(metrics.average_cycle_length, None);
        assert_eq!(metrics.previous_period_duration, None);
        assert_eq!(
            metrics.last_period_start,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn three_periods_summarised_and_graded_normal() {
        let periods = vec![
            logged("2024-02-25", "2024-03-01"),
            logged("2024-01-01", "2024-01-05"),
            logged("2024-01-29", "2024-02-01"),
        ];
        let metrics = cycle_metrics(&periods);
        assert_eq!(metrics.total_periods, 3);
        assert_eq!(metrics.average_cycle_length, Some(27.5));
        assert_eq!(metrics.shortest_cycle, Some(27));
        assert_eq!(metrics.longest_cycle, Some(28));
        assert_eq!(metrics.cycle_variation, Some(1));
        assert_eq!(metrics.previous_cycle_length, Some(27));
        assert_eq!(metrics.previous_period_duration, Some(6));
        assert_eq!(
            metrics.last_period_end,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );

        let assessment = assess(&metrics);
        assert_eq!(assessment.cycle_length, RangeStatus::Normal);
        assert_eq!(assessment.period_duration, RangeStatus::Normal);
        assert_eq!(assessment.regularity, Regularity::Regular);
    }

    #[test]
    fn flags_long_cycles_and_irregularity() {
        let periods = vec![
            logged("2024-01-01", "2024-01-09"),
            logged("2024-01-25", "2024-01-27"),
            logged("2024-03-10", "2024-03-18"),
        ];
        let assessment = assess(&cycle_metrics(&periods));
        assert_eq!(assessment.cycle_length, RangeStatus::Abnormal);
        assert_eq!(assessment.period_duration, RangeStatus::Abnormal);
        assert_eq!(assessment.regularity, Regularity::Irregular);
    }

    #[test]
    fn two_periods_are_too_few_for_regularity() {
        let periods = vec![
            logged("2024-01-01", "2024-01-05"),
            logged("2024-01-29", "2024-02-02"),
        ];
        assert_eq!(assess(&cycle_metrics(&periods)).regularity, Regularity::Unknown);
    }

    #[test]
    fn skips_malformed_and_duplicate_entries() {
        let periods = vec![
            logged("2024-01-01", "2024-01-05"),
            logged("2024-01-01", "2024-01-05"),
            logged("bogus", "2024-01-05"),
        ];
        let metrics = cycle_metrics(&periods);
        assert_eq!(metrics.total_periods, 2);
        assert_eq!(metrics.previous_cycle_length, None);
        assert_eq!(metrics.average_cycle_length, None);
        assert_eq!(metrics.previous_period_duration, Some(5));
    }
}
