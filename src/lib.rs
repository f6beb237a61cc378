//! Fundwise - personal-finance dashboard for students
//!
//! This library provides the core functionality for the Fundwise dashboard:
//! expense and income records, per-category budgets, savings goals, and the
//! figures derived from them (balance, savings rate, budget utilization,
//! goal progress, spending trends).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (records, budgets, goals, etc.)
//! - `metrics`: Pure derived-metric calculations
//! - `storage`: Sample data and JSON file storage
//! - `services`: View models for the dashboard, goals and analytics tabs
//! - `app`: Tab navigation, entry forms and notifications
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fundwise::services::Dashboard;
//! use fundwise::storage::{FinanceRepository, SampleData};
//!
//! let sample = SampleData::new();
//! let today = sample.reference_date().unwrap();
//! let dashboard = Dashboard::generate(&sample, today, 4)?;
//! println!("Balance: {}", dashboard.balance);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FundwiseError, FundwiseResult};
