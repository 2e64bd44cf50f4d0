//! Data models for Sitecraft.
//!
//! - [`Phase`]: milestones reported by the background creation operation
//! - [`Step`] and [`StepTable`]: the checklist and the phase -> reached-step lookup
//! - [`ProgressDisplay`]: the view model the host renders
//! - [`ControllerSnapshot`]: the state persisted across teardown and recreation
//! - [`AppConfig`]: application settings loaded by [`ConfigManager`](crate::config::ConfigManager)
//!
//! Phase and step definitions are process-wide constants. Snapshots and
//! configuration derive `Serialize`/`Deserialize` for YAML persistence.

pub mod config;
pub mod phase;
pub mod progress;

pub use config::{AppConfig, BusSettings, DemoSettings, LoggingSettings};
pub use phase::{Phase, STEP_COUNT, Step, StepTable};
pub use progress::{ControllerSnapshot, CreationParams, DisplayMode, Panel, ProgressDisplay};
