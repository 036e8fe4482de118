//! Per-event decision: forward, suppress, or re-enable.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{RawEvent, RawEventKind, TapHandler, TapVerdict};
use crate::actions::ActionPerformer;
use crate::events::{AppEvent, ButtonObservation, EventPublisher};
use crate::foreground::ForegroundTracker;
use crate::model::MouseButton;
use crate::store::ProfileStore;

/// Resolves each auxiliary button event against the current profile.
///
/// Reads only lock-free snapshots (configuration and foreground app), so a
/// decision never waits on a writer.
pub struct Dispatcher {
    store: Arc<ProfileStore>,
    foreground: Arc<ForegroundTracker>,
    performer: Box<dyn ActionPerformer>,
    events: EventPublisher,
}

impl Dispatcher {
    pub fn new(
        store: Arc<ProfileStore>,
        foreground: Arc<ForegroundTracker>,
        performer: Box<dyn ActionPerformer>,
        events: EventPublisher,
    ) -> Self {
        Self {
            store,
            foreground,
            performer,
            events,
        }
    }
}

impl TapHandler for Dispatcher {
    fn handle(&self, event: &RawEvent) -> TapVerdict {
        let direction = match event.kind {
            RawEventKind::TapDisabledByTimeout => {
                warn!("event tap disabled by timeout, re-enabling");
                return TapVerdict::ReenableAndForward;
            }
            RawEventKind::Other => return TapVerdict::Forward,
            RawEventKind::AuxButtonDown | RawEventKind::AuxButtonUp => match event.direction() {
                Some(direction) => direction,
                None => return TapVerdict::Forward,
            },
        };

        self.events
            .publish(AppEvent::ButtonObserved(ButtonObservation::now(event.button_code, direction)));

        let Some(button) = MouseButton::from_code(event.button_code) else {
            return TapVerdict::Forward;
        };

        let config = self.store.snapshot();
        let bundle_id = self.foreground.bundle_identifier();
        let Some(profile) = config.profile_ref_for(bundle_id.as_deref()) else {
            return TapVerdict::Forward;
        };
        let Some(mapping) = profile.active_mapping(button) else {
            return TapVerdict::Forward;
        };

        if direction.is_down() {
            debug!(
                button = button.code(),
                profile = %profile.name,
                action = %mapping.display_string(),
                "performing mapped action"
            );
            self.performer.perform(&mapping.action);
        }
        TapVerdict::Suppress
    }
}
