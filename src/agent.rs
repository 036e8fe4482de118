//! The agent: wires store, foreground tracker and interceptor together.
//!
//! The interceptor runs exactly when accessibility trust is held and the
//! configuration's enabled flag is set. Every input that can change either
//! side (trust grant, toggle, reload) funnels through [`Agent::sync`].
//!
//! Owned by the main run loop; nothing here is touched from another thread
//! except through the shared store and tracker snapshots.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::actions::ActionPerformer;
use crate::error::StoreError;
use crate::events::{AppEvent, ButtonObservation, EventBus, EventPublisher};
use crate::foreground::ForegroundTracker;
use crate::interceptor::{Dispatcher, EventTap, Interceptor, InterceptorState};
use crate::store::ProfileStore;

pub struct Agent<T: EventTap> {
    store: Arc<ProfileStore>,
    interceptor: Interceptor<T>,
    bus: EventBus,
    trusted: bool,
    last_observation: Option<ButtonObservation>,
}

impl<T: EventTap> Agent<T> {
    pub fn new(
        store: Arc<ProfileStore>,
        foreground: Arc<ForegroundTracker>,
        tap: T,
        performer: Box<dyn ActionPerformer>,
    ) -> Self {
        let bus = EventBus::new();
        let dispatcher = Dispatcher::new(
            Arc::clone(&store),
            foreground,
            performer,
            bus.publisher(),
        );
        let interceptor = Interceptor::new(tap, Arc::new(dispatcher)).with_events(bus.publisher());
        Self {
            store,
            interceptor,
            bus,
            trusted: false,
            last_observation: None,
        }
    }

    pub fn store(&self) -> &Arc<ProfileStore> {
        &self.store
    }

    /// Handle for OS observers that report into the main loop.
    pub fn publisher(&self) -> EventPublisher {
        self.bus.publisher()
    }

    pub fn interceptor_state(&self) -> InterceptorState {
        self.interceptor.state()
    }

    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// Most recent auxiliary button event drained from the bus.
    pub fn last_observation(&self) -> Option<ButtonObservation> {
        self.last_observation
    }

    /// Trust was granted (at start or by polling). Later calls are no-ops.
    pub fn on_trust_granted(&mut self) {
        if self.trusted {
            return;
        }
        self.trusted = true;
        self.sync();
    }

    /// Persist the enabled flag and start or stop accordingly.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.store.set_enabled(enabled)?;
        info!(enabled, "remapping toggled");
        self.sync();
        Ok(())
    }

    /// Re-read the configuration after an external edit. A document that
    /// fails to parse is ignored and the current one kept.
    pub fn reload_config(&mut self) -> bool {
        match self.store.reload() {
            Ok(true) => {
                self.sync();
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("ignoring configuration change: {e}");
                false
            }
        }
    }

    /// Bring the interceptor in line with trust and the enabled flag.
    pub fn sync(&mut self) {
        let wanted = self.trusted && self.store.snapshot().is_enabled;
        if wanted {
            // Stays stopped until the next sync; the interceptor logs the cause
            if let Err(e) = self.interceptor.start() {
                debug!("interceptor not started: {e}");
            }
        } else {
            self.interceptor.stop();
        }
    }

    /// Process everything published since the last call. Returns the count.
    pub fn drain_events(&mut self) -> usize {
        let events = self.bus.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    fn handle_event(&mut self, event: AppEvent) {
        let what = event.description();
        match event {
            AppEvent::ButtonObserved(observation) => {
                debug!(
                    button = observation.button_code,
                    direction = observation.direction.label(),
                    "{what}"
                );
                self.last_observation = Some(observation);
            }
            AppEvent::ForegroundChanged(app) => {
                let profile = self.store.profile_for(app.bundle_identifier.as_deref());
                debug!(
                    app = app.name.as_deref().unwrap_or("-"),
                    profile = %profile.name,
                    "{what}"
                );
            }
            AppEvent::InterceptorChanged(state) => debug!(%state, "{what}"),
        }
    }
}
