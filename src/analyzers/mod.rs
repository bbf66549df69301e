//! Grading and batch aggregation.
//!
//! This module classifies marks into letter grades and feedback tiers,
//! computes per-subject statistics and high-performer counts over a
//! dataset, and builds the series behind the dashboard charts.

pub mod aggregate;
pub mod charts;
pub mod grade;
pub mod types;
pub mod utility;
