use crate::models::phase::Phase;
use crate::models::progress::CreationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration from `sitecraft.yaml`, overridable from the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingSettings,
    pub bus: BusSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: String,
    pub prefix: String,
    pub debug: bool,
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            prefix: "sitecraft".to_string(),
            debug: false,
            console: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusSettings {
    /// Notifications buffered per subscriber before it is considered lagging
    pub capacity: usize,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Settings for the terminal demo host and its scripted backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub title: String,
    pub tagline: String,
    pub slug: String,
    pub theme_id: String,
    pub step_delay_ms: u64,
    pub step_timeout_secs: u64,

    /// Phase at which the scripted backend reports a failure
    pub fail_at: Option<Phase>,

    /// Phase after which the demo tears the session down and recreates it
    pub teardown_after: Option<Phase>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            tagline: "Just another site".to_string(),
            slug: "mysite".to_string(),
            theme_id: "twentyseventeen".to_string(),
            step_delay_ms: 400,
            step_timeout_secs: 30,
            fail_at: None,
            teardown_after: Some(Phase::SetTagline),
        }
    }
}

impl DemoSettings {
    pub fn params(&self) -> CreationParams {
        CreationParams {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            slug: self.slug.clone(),
            theme_id: self.theme_id.clone(),
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }
}
