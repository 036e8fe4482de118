//! Application events for inter-module communication.
//!
//! These events carry observations out of the event-tap callback and the
//! OS observers to the main-loop consumer. Publishing never blocks, so the
//! tap callback can emit them without delaying its decision.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use std::time::SystemTime;

use crate::foreground::ForegroundApp;
use crate::interceptor::InterceptorState;

/// Direction of an auxiliary button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonDirection {
    Down,
    Up,
}

impl ButtonDirection {
    pub fn is_down(self) -> bool {
        self == ButtonDirection::Down
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonDirection::Down => "DOWN",
            ButtonDirection::Up => "UP",
        }
    }
}

/// One raw auxiliary button event as seen by the interceptor.
///
/// The code is kept raw so that buttons without a known mapping still
/// show up for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonObservation {
    pub button_code: i64,
    pub direction: ButtonDirection,
    pub timestamp: SystemTime,
}

impl ButtonObservation {
    pub fn now(button_code: i64, direction: ButtonDirection) -> Self {
        Self {
            button_code,
            direction,
            timestamp: SystemTime::now(),
        }
    }
}

/// Application-level events for decoupled communication between modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// An auxiliary button went down or up (published from the tap callback).
    ButtonObserved(ButtonObservation),

    /// A different application came to the foreground.
    ForegroundChanged(ForegroundApp),

    /// The interceptor was started or stopped.
    InterceptorChanged(InterceptorState),
}

impl AppEvent {
    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::ButtonObserved(_) => "Auxiliary button observed",
            AppEvent::ForegroundChanged(_) => "Foreground application changed",
            AppEvent::InterceptorChanged(_) => "Interceptor state changed",
        }
    }
}
