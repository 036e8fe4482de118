//! NSWorkspace observers and main-loop timers.

use std::sync::Arc;
use std::time::Duration;

use crate::events::{AppEvent, EventPublisher};
use crate::foreground::{ForegroundApp, ForegroundTracker};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring, string_from_nsstring, RcBlock, YES,
};

/// Identity of an `NSRunningApplication`.
///
/// # Safety
/// `app` must be nil or a valid NSRunningApplication.
unsafe fn app_identity(app: id) -> Option<ForegroundApp> {
    if app.is_null() {
        return None;
    }
    let bundle_id: id = msg_send![app, bundleIdentifier];
    let name: id = msg_send![app, localizedName];
    Some(ForegroundApp {
        bundle_identifier: string_from_nsstring(bundle_id).filter(|s| !s.is_empty()),
        name: string_from_nsstring(name),
    })
}

/// The application frontmost right now.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn frontmost_application() -> Option<ForegroundApp> {
    let ws: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let app: id = msg_send![ws, frontmostApplication];
    app_identity(app)
}

/// Keep `tracker` current with application activations and announce each
/// switch on the bus.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn install_activation_observer(tracker: Arc<ForegroundTracker>, events: EventPublisher) {
    let ws: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let nc: id = msg_send![ws, notificationCenter];

    let block = RcBlock::new(move |note: id| unsafe {
        let info: id = msg_send![note, userInfo];
        if info.is_null() {
            return;
        }
        let key = nsstring("NSWorkspaceApplicationKey");
        let app: id = msg_send![info, objectForKey: &*key];
        if let Some(identity) = app_identity(app) {
            tracker.update(identity.clone());
            events.publish(AppEvent::ForegroundChanged(identity));
        }
    });

    let name = nsstring("NSWorkspaceDidActivateApplicationNotification");
    let _: id =
        msg_send![nc, addObserverForName: &*name, object: nil, queue: nil, usingBlock: &*block];
}

/// Schedule a repeating NSTimer on the current (main) run loop.
///
/// The block receives the timer, so it can invalidate itself.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn schedule_repeating<F>(interval: Duration, f: F) -> id
where
    F: Fn(id) + 'static,
{
    let block = RcBlock::new(f);
    msg_send![
        get_class("NSTimer"),
        scheduledTimerWithTimeInterval: interval.as_secs_f64(),
        repeats: YES,
        block: &*block
    ]
}
