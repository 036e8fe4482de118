//! The agent's main run loop.
//!
//! Runs as an accessory application (no Dock icon, no menu bar). Everything
//! happens on the main thread: the tap callback, workspace notifications
//! and the three timers (trust polling, config watching, event draining).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{info, warn};

use crate::actions::SystemActionPerformer;
use crate::agent::Agent;
use crate::foreground::ForegroundTracker;
use crate::model::constants::{
    CONFIG_DEBOUNCE, CONFIG_POLL_INTERVAL, CONFIG_WATCH_INTERVAL, EVENT_DRAIN_INTERVAL,
    TRUST_POLL_INTERVAL,
};
use crate::permission::{GateStart, PermissionGate};
use crate::platform::macos::ffi::bridge::{autoreleasepool, id, msg_send, NSApp};
use crate::platform::macos::input::{
    frontmost_application, install_activation_observer, schedule_repeating, AxTrustChecker,
    CoreGraphicsSynthesizer, MacEventTap,
};
use crate::store::{ConfigWatcher, JsonFileStorage, ProfileStore};

type SharedAgent = Rc<RefCell<Agent<MacEventTap>>>;

/// Run the agent until the process is terminated.
pub fn run(storage: JsonFileStorage) {
    autoreleasepool(|| unsafe {
        let app = NSApp();
        // NSApplicationActivationPolicyAccessory = 1
        let _: bool = msg_send![app, setActivationPolicy: 1i64];

        let watcher = match ConfigWatcher::new(storage.path(), CONFIG_POLL_INTERVAL, CONFIG_DEBOUNCE) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("configuration will not reload automatically: {e}");
                None
            }
        };
        let store = Arc::new(ProfileStore::load(Box::new(storage)));
        let foreground = Arc::new(ForegroundTracker::new(frontmost_application()));
        let performer = SystemActionPerformer::new(CoreGraphicsSynthesizer);

        let agent: SharedAgent = Rc::new(RefCell::new(Agent::new(
            store,
            Arc::clone(&foreground),
            MacEventTap::new(),
            Box::new(performer),
        )));

        install_activation_observer(foreground, agent.borrow().publisher());

        let mut gate = PermissionGate::new(AxTrustChecker);
        match gate.begin() {
            GateStart::Trusted => agent.borrow_mut().on_trust_granted(),
            GateStart::Polling => start_trust_polling(gate, Rc::clone(&agent)),
        }

        if let Some(watcher) = watcher {
            start_config_watch(watcher, Rc::clone(&agent));
        }
        start_event_drain(Rc::clone(&agent));

        {
            let agent = agent.borrow();
            info!(
                config = %agent.store().location(),
                interceptor = %agent.interceptor_state(),
                "mousemap agent running"
            );
        }

        let _: () = msg_send![app, run];
    });
}

/// Poll trust until granted, then start the interceptor and stop polling.
unsafe fn start_trust_polling(gate: PermissionGate<AxTrustChecker>, agent: SharedAgent) {
    let gate = RefCell::new(gate);
    schedule_repeating(TRUST_POLL_INTERVAL, move |timer: id| {
        let mut gate = gate.borrow_mut();
        if gate.poll() {
            agent.borrow_mut().on_trust_granted();
        }
        if !gate.wants_polling() {
            let _: () = unsafe { msg_send![timer, invalidate] };
        }
    });
}

/// Pick up edits made to the document by another process.
unsafe fn start_config_watch(watcher: ConfigWatcher, agent: SharedAgent) {
    schedule_repeating(CONFIG_WATCH_INTERVAL, move |_timer: id| {
        if watcher.pending() {
            agent.borrow_mut().reload_config();
        }
    });
}

unsafe fn start_event_drain(agent: SharedAgent) {
    schedule_repeating(EVENT_DRAIN_INTERVAL, move |_timer: id| {
        agent.borrow_mut().drain_events();
    });
}
