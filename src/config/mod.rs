//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (formatting and alert thresholds)

pub mod paths;
pub mod settings;

pub use paths::FinTrackPaths;
pub use settings::{DisplayLabels, NumberFormat, Settings};
