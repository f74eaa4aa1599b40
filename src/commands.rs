use serde::Serialize;

use crate::cli::{Command, DayArgs, HorizonArgs, ToggleArgs};
use crate::history;
use crate::input::History;
use crate::insight;
use crate::metrics;
use crate::models::*;
use crate::prediction;

/// Output of the `stats` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsReport {
    pub metrics: CycleMetrics,
    pub assessment: CycleAssessment,
}

/// Run `command` against a loaded history and return its JSON output.
pub fn execute(command: &Command, history: &History) -> serde_json::Result<serde_json::Value> {
    match command {
        Command::Predict(args) => serde_json::to_value(predict(history, args)),
        Command::Stats => serde_json::to_value(stats(history)),
        Command::Day(args) => serde_json::to_value(day(history, args)),
        Command::Toggle(args) => serde_json::to_value(toggle(history, args)),
    }
}

pub fn predict(history: &History, args: &HorizonArgs) -> Prediction {
    let prediction = prediction::predict_with_horizon(&history.periods, args.horizon.into());
    if prediction.is_available() {
        tracing::info!(
            average_cycle_length = ?prediction.average_cycle_length,
            forecasts = prediction.predicted_periods.len(),
            "prediction computed"
        );
    } else {
        tracing::info!(periods = history.periods.len(), "not enough history to predict");
    }
    prediction
}

pub fn stats(history: &History) -> StatsReport {
    let metrics = metrics::cycle_metrics(&history.periods);
    let assessment = metrics::assess(&metrics);
    tracing::debug!(total_periods = metrics.total_periods, "cycle stats computed");
    StatsReport {
        metrics,
        assessment,
    }
}

pub fn day(history: &History, args: &DayArgs) -> DayInsight {
    let prediction = predict(history, &args.forecast);
    insight::describe_day(&history.periods, &prediction, args.date)
}

/// Toggle a period on `args.date`. Records whose dates do not parse are
/// carried through untouched so that nothing is lost when the caller saves.
pub fn toggle(history: &History, args: &ToggleArgs) -> Vec<LoggedPeriod> {
    let (valid, invalid): (Vec<&LoggedPeriod>, Vec<&LoggedPeriod>) =
        history.periods.iter().partition(|p| p.parse().is_some());
    if !invalid.is_empty() {
        tracing::warn!(count = invalid.len(), "keeping unparseable period records as-is");
    }

    let ranges: Vec<PeriodRange> = valid.iter().filter_map(|p| p.parse()).collect();
    let updated = history::toggle_day(&ranges, args.date);
    tracing::info!(
        date = %args.date,
        before = ranges.len(),
        after = updated.len(),
        "period toggled"
    );

    updated
        .into_iter()
        .map(LoggedPeriod::from)
        .chain(invalid.into_iter().cloned())
        .collect()
}
