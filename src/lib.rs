#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Per-application remapping of extra mouse buttons.
//!
//! The core (model, store, dispatch, permission gate, agent) is free of
//! macOS FFI so tests can run as normal integration tests on any host.
//! OS bindings live under `platform` and only plug into the seams defined
//! here: [`interceptor::EventTap`], [`actions::InputSynthesizer`],
//! [`permission::TrustChecker`] and [`store::ConfigStorage`].

pub mod actions;
pub mod agent;
pub mod error;
pub mod events;
pub mod foreground;
pub mod interceptor;
pub mod model;
pub mod permission;
pub mod store;

#[cfg(target_os = "macos")]
pub mod platform;

// Re-export the types most callers need
pub use agent::Agent;
pub use error::{StoreError, SynthError, TapError};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use model::{AppConfiguration, AppProfile, ButtonMapping, MappingAction, MouseButton};
pub use store::ProfileStore;
