//! Core analytics for the ENERGIX fuel and energy dashboard.
//!
//! The library is the computational half of the dashboard: record
//! validation, monthly and per-vehicle aggregation, emission/LCA
//! conversion, interpretation of backend-fitted regression results, and
//! the fixed fr-FR formatting layer. The HTTP surface lives in the
//! `services/api` member and calls in through [`analytics`] and
//! [`format`].

pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod telemetry;
