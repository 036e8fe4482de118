//! Event system for decoupled inter-module communication.
//!
//! The event-tap callback must decide synchronously whether to forward or
//! swallow each button event. Everything else that wants to know about the
//! event (logging, the last-observation record) is fed through this bus and
//! handled later on the main loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Event tap  │     │  Workspace  │     │ Interceptor │
//! │  callback   │     │  observer   │     │ start/stop  │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     EventBus                        │
//! │                   (mpsc channel)                    │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 Agent::handle_event                 │
//! │                (main loop, NSTimer)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`AppEvent`, `ButtonObservation`)
//! - [`bus`]: `EventBus` and `EventPublisher` types

pub mod bus;
pub mod types;

// Re-export main types for convenient access
pub use bus::{EventBus, EventPublisher};
pub use types::{AppEvent, ButtonDirection, ButtonObservation};
