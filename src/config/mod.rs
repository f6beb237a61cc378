//! Configuration module for Fundwise
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FundwisePaths;
pub use settings::{DataSource, Settings};
