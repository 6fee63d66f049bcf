//! Deconfliction CLI - scenario runner for pre-flight conflict checks.
//!
//! This crate provides:
//! - built-in sample schedules and JSON scenario files
//! - environment configuration for separation thresholds
//! - text and JSON conflict reports

pub mod config;
pub mod report;
pub mod sim;

pub use config::Config;
pub use sim::Scenario;
