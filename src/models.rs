use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A period as it arrives from storage or the API: two date strings that
/// have not been validated yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggedPeriod {
    #[serde(alias = "start_date")]
    pub start: String,
    #[serde(alias = "end_date")]
    pub end: String,
}

impl LoggedPeriod {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns `None` if either date does not resolve to a calendar day.
    pub fn parse(&self) -> Option<PeriodRange> {
        Some(PeriodRange {
            start: parse_day(&self.start)?,
            end: parse_day(&self.end)?,
        })
    }
}

impl From<PeriodRange> for LoggedPeriod {
    fn from(range: PeriodRange) -> Self {
        Self {
            start: range.start.format("%Y-%m-%d").to_string(),
            end: range.end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Parse `YYYY-MM-DD`, falling back to the calendar date of an RFC 3339 timestamp.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, counting both endpoints. Never less than 1.
    pub fn duration_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    pub fn overlaps(&self, other: &PeriodRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Fertile window around the estimated ovulation day, serialized as
/// `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OvulationWindow(pub NaiveDate, pub NaiveDate);

impl OvulationWindow {
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.0 && day <= self.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_period: Option<PeriodRange>,
    pub predicted_periods: Vec<PeriodRange>,
    pub predicted_ovulation: Option<OvulationWindow>,
    pub average_cycle_length: Option<f64>,
}

impl Prediction {
    /// The "not enough history yet" result.
    pub fn insufficient() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.predicted_period.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CycleMetrics {
    pub total_periods: usize,
    pub average_cycle_length: Option<f64>,
    pub average_period_length: Option<f64>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub previous_cycle_length: Option<i64>,
    pub previous_period_duration: Option<i64>,
    pub cycle_variation: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RangeStatus {
    Normal,
    Abnormal,
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Regularity {
    Regular,
    Irregular,
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleAssessment {
    pub cycle_length: RangeStatus,
    pub period_duration: RangeStatus,
    pub regularity: Regularity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "day")]
pub enum CycleDay {
    NoHistory,
    NotStarted,
    Day(i64),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum DayKind {
    Period { day: i64 },
    PredictedOvulation,
    PredictedPeriod { day: i64 },
    Unmarked,
}

/// What the calendar should say about a single day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayInsight {
    pub date: NaiveDate,
    pub cycle_day: CycleDay,
    pub kind: DayKind,
}
