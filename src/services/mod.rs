//! Services module - the background site creation operation.
//!
//! The UI never talks to the creation work directly. It issues one start
//! command through [`SiteCreator`] and then follows progress on the
//! [`PhaseBus`](crate::bus::PhaseBus).
//!
//! # Components
//!
//! - [`SiteCreator`]: the fire-and-forget start command
//! - [`CreationBackend`]: performs the work behind one phase
//! - [`SiteCreationService`]: walks the phases on the tokio runtime and publishes them
//! - [`ScriptedBackend`]: deterministic backend for the demo host and tests
//! - [`CreationError`]: backend failures, reported on the bus only as `FAILURE`

pub mod creation;
pub mod scripted;

pub use creation::{CreationBackend, CreationError, SiteCreationService, SiteCreator};
pub use scripted::ScriptedBackend;
