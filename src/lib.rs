//! Period and ovulation forecasting from a logged period history.
//!
//! [`prediction::predict`] is the entry point: it takes every period a user has
//! logged, in any order, and returns the next expected period together with the
//! fertile window before it. It is a pure function; callers own loading and
//! saving history.

pub mod cli;
pub mod commands;
pub mod history;
pub mod input;
pub mod insight;
pub mod metrics;
pub mod models;
pub mod prediction;

pub use models::{LoggedPeriod, OvulationWindow, PeriodRange, Prediction};
pub use prediction::{predict, predict_with_horizon};
