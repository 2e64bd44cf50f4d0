// Sitecraft - progress tracking for multi-step background site creation
//
// This is the library crate containing the progress state machine, the sticky
// notification bus and the background creation service.
// The binary crate (main.rs) provides a terminal demo host.

pub mod bus;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types for convenience
pub use bus::{PhaseBus, StickyBus, SubscriptionHandle};
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{AppConfig, ControllerSnapshot, CreationParams, DisplayMode, Phase, Step};
pub use ui::{CreationListener, CreationSession, ProgressController, SubscriptionLifecycle};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
