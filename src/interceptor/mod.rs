//! Global input interception.
//!
//! The OS delivers raw events to a thin platform shim (`EventTap`), which
//! converts them to [`RawEvent`], asks a [`TapHandler`] for a verdict and
//! carries the verdict out. All decisions live in the handler
//! ([`Dispatcher`]); the shim holds no business logic.
//!
//! ```text
//! OS event ──▶ EventTap shim ──▶ TapHandler::handle ──▶ TapVerdict
//!                   ▲                                      │
//!                   └──────── forward / swallow / re-enable ◀┘
//! ```

pub mod dispatch;

use std::fmt;
use std::sync::Arc;

use tracing::{error, info};

use crate::error::TapError;
use crate::events::{AppEvent, ButtonDirection, EventPublisher};

pub use dispatch::Dispatcher;

/// Kinds of raw events the shim reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEventKind {
    /// An auxiliary (non primary/secondary) button went down.
    AuxButtonDown,
    /// An auxiliary button went up.
    AuxButtonUp,
    /// The OS disabled the listener because a callback was too slow.
    TapDisabledByTimeout,
    /// Anything else the listener happens to receive.
    Other,
}

/// A raw event reduced to the fields dispatch needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    /// Button number; only meaningful for auxiliary button kinds.
    pub button_code: i64,
}

impl RawEvent {
    pub fn button(direction: ButtonDirection, button_code: i64) -> Self {
        let kind = match direction {
            ButtonDirection::Down => RawEventKind::AuxButtonDown,
            ButtonDirection::Up => RawEventKind::AuxButtonUp,
        };
        Self { kind, button_code }
    }

    pub fn of_kind(kind: RawEventKind) -> Self {
        Self {
            kind,
            button_code: 0,
        }
    }

    /// Direction for auxiliary button events, `None` for everything else.
    pub fn direction(&self) -> Option<ButtonDirection> {
        match self.kind {
            RawEventKind::AuxButtonDown => Some(ButtonDirection::Down),
            RawEventKind::AuxButtonUp => Some(ButtonDirection::Up),
            _ => None,
        }
    }
}

/// What the shim must do with the event it delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapVerdict {
    /// Pass the original event on unmodified.
    Forward,
    /// Swallow the event; nothing downstream sees it.
    Suppress,
    /// Re-enable the listener, then pass the original event on.
    ReenableAndForward,
}

/// Decides the fate of each raw event. Called synchronously from the OS
/// callback, so implementations must return promptly.
pub trait TapHandler: Send + Sync {
    fn handle(&self, event: &RawEvent) -> TapVerdict;
}

/// OS binding for a head-of-queue listener on auxiliary button down/up.
pub trait EventTap {
    /// Register the listener and route its events to `handler`.
    fn install(&mut self, handler: Arc<dyn TapHandler>) -> Result<(), TapError>;

    /// Unregister the listener and release its OS resources.
    fn remove(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterceptorState {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for InterceptorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterceptorState::Stopped => f.write_str("stopped"),
            InterceptorState::Running => f.write_str("running"),
        }
    }
}

/// Owns the listener's lifecycle: at most one registration at a time.
pub struct Interceptor<T: EventTap> {
    tap: T,
    handler: Arc<dyn TapHandler>,
    state: InterceptorState,
    events: Option<EventPublisher>,
}

impl<T: EventTap> Interceptor<T> {
    pub fn new(tap: T, handler: Arc<dyn TapHandler>) -> Self {
        Self {
            tap,
            handler,
            state: InterceptorState::Stopped,
            events: None,
        }
    }

    /// Publish start/stop transitions on the bus.
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> InterceptorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == InterceptorState::Running
    }

    pub fn tap(&self) -> &T {
        &self.tap
    }

    /// Stopped → Running. A no-op while already running.
    ///
    /// On failure the interceptor stays stopped; there is no retry.
    pub fn start(&mut self) -> Result<(), TapError> {
        if self.is_running() {
            return Ok(());
        }
        if let Err(e) = self.tap.install(Arc::clone(&self.handler)) {
            error!("{e}");
            return Err(e);
        }
        self.transition(InterceptorState::Running);
        Ok(())
    }

    /// Running → Stopped. A no-op while already stopped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.tap.remove();
        self.transition(InterceptorState::Stopped);
    }

    fn transition(&mut self, state: InterceptorState) {
        self.state = state;
        info!("event tap {state}");
        if let Some(events) = &self.events {
            events.publish(AppEvent::InterceptorChanged(state));
        }
    }
}

impl<T: EventTap> Drop for Interceptor<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTap {
        installed: usize,
        removed: usize,
        fail: bool,
    }

    impl EventTap for CountingTap {
        fn install(&mut self, _handler: Arc<dyn TapHandler>) -> Result<(), TapError> {
            if self.fail {
                return Err(TapError::CreateFailed);
            }
            self.installed += 1;
            Ok(())
        }

        fn remove(&mut self) {
            self.removed += 1;
        }
    }

    struct ForwardAll;

    impl TapHandler for ForwardAll {
        fn handle(&self, _event: &RawEvent) -> TapVerdict {
            TapVerdict::Forward
        }
    }

    #[test]
    fn start_is_idempotent() {
        let mut interceptor = Interceptor::new(CountingTap::default(), Arc::new(ForwardAll));
        interceptor.start().unwrap();
        interceptor.start().unwrap();
        assert!(interceptor.is_running());
        assert_eq!(interceptor.tap().installed, 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut interceptor = Interceptor::new(CountingTap::default(), Arc::new(ForwardAll));
        interceptor.stop();
        interceptor.start().unwrap();
        interceptor.stop();
        interceptor.stop();
        assert_eq!(interceptor.state(), InterceptorState::Stopped);
        assert_eq!(interceptor.tap().removed, 1);
    }

    #[test]
    fn failed_install_stays_stopped() {
        let tap = CountingTap {
            fail: true,
            ..Default::default()
        };
        let mut interceptor = Interceptor::new(tap, Arc::new(ForwardAll));
        assert_eq!(interceptor.start(), Err(TapError::CreateFailed));
        assert_eq!(interceptor.state(), InterceptorState::Stopped);
    }

    #[test]
    fn raw_event_direction() {
        assert_eq!(RawEvent::button(ButtonDirection::Up, 3).direction(), Some(ButtonDirection::Up));
        assert_eq!(RawEvent::of_kind(RawEventKind::Other).direction(), None);
    }
}
