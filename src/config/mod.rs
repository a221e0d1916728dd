//! Configuration loading and management for the overwork tracker.
//!
//! This module loads the tracker configuration from a directory of YAML
//! files: general settings plus hourly rates by effective date.
//!
//! # Example
//!
//! ```no_run
//! use overwork_tracker::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded tracker: {}", loader.config().settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{RateConfig, TrackerConfig, TrackerSettings};
