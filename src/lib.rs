//! vitalwatch - vital-sign monitoring library
//!
//! This library classifies heart rate and body temperature readings
//! against configurable normal bands, and runs monitoring sessions that
//! notify when a subject's alert level changes.
//!
//! # Modules
//!
//! - [`alerts`]: Alert classification and notification channels
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`feed`]: Vital feed abstraction layer
//! - [`logging`]: Logger setup
//! - [`services`]: Monitoring session and profile store

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod logging;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
