// UI module - progress screen logic
//
// This module contains:
// - ProgressController: maps phase notifications onto the checklist view model
// - SubscriptionLifecycle: binds the controller to the phase bus while foregrounded
// - CreationListener: the capability the host hands to the controller
// - CreationSession: composes the above for one appearance of the screen

pub mod controller;
pub mod lifecycle;
pub mod listener;
pub mod session;

pub use controller::ProgressController;
pub use lifecycle::{BindingState, SubscriptionLifecycle};
pub use listener::CreationListener;
pub use session::CreationSession;
