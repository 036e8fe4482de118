//! Accessibility trust gate.
//!
//! Installing the global listener and posting synthetic input both require
//! the process to be trusted. The gate checks once at start, prompts if
//! needed, then polls until trust arrives. It reports the transition
//! exactly once and never goes back to untrusted.

use tracing::info;

/// OS binding for the trust flag.
pub trait TrustChecker {
    /// Current trust state, without side effects.
    fn is_trusted(&self) -> bool;

    /// Ask the OS to show its permission prompt. Returns the trust state
    /// reported alongside the prompt.
    fn request_trust(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Not yet checked.
    Unknown,
    /// Untrusted, waiting for the user.
    Polling,
    Trusted,
}

/// Outcome of [`PermissionGate::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStart {
    /// Trust is held; start the interceptor now and never poll.
    Trusted,
    /// The user was prompted; call [`PermissionGate::poll`] on a timer.
    Polling,
}

pub struct PermissionGate<C> {
    checker: C,
    state: GateState,
}

impl<C: TrustChecker> PermissionGate<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            state: GateState::Unknown,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_trusted(&self) -> bool {
        self.state == GateState::Trusted
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Initial check. Prompts once if untrusted.
    pub fn begin(&mut self) -> GateStart {
        match self.state {
            GateState::Trusted => return GateStart::Trusted,
            GateState::Polling => return GateStart::Polling,
            GateState::Unknown => {}
        }
        if self.checker.is_trusted() || self.checker.request_trust() {
            self.grant();
            return GateStart::Trusted;
        }
        info!("accessibility access not granted yet, waiting");
        self.state = GateState::Polling;
        GateStart::Polling
    }

    /// One poll tick. Returns true exactly once, on the tick that first
    /// observes trust; every later call returns false without asking the OS.
    pub fn poll(&mut self) -> bool {
        if self.state != GateState::Polling {
            return false;
        }
        if !self.checker.is_trusted() {
            return false;
        }
        self.grant();
        true
    }

    /// Whether the poll timer should still be running.
    pub fn wants_polling(&self) -> bool {
        self.state == GateState::Polling
    }

    fn grant(&mut self) {
        self.state = GateState::Trusted;
        info!("accessibility access granted");
    }
}
