//! CGEventTap shim for auxiliary mouse buttons.
//!
//! Converts each delivered CGEvent into a [`RawEvent`], hands it to the
//! installed [`TapHandler`] and applies the verdict. Returning null from the
//! callback swallows the event.

use std::cell::Cell;
use std::ffi::c_void;
use std::sync::Arc;

use tracing::debug;

use crate::error::TapError;
use crate::events::ButtonDirection;
use crate::interceptor::{EventTap, RawEvent, RawEventKind, TapHandler, TapVerdict};
use crate::platform::macos::ffi::*;

/// State the callback reaches through its `user_info` pointer.
struct TapContext {
    handler: Arc<dyn TapHandler>,
    // Set right after creation; needed to re-enable after a timeout
    port: Cell<CFMachPortRef>,
}

struct InstalledTap {
    port: CFMachPortRef,
    source: CFRunLoopSourceRef,
    context: *mut TapContext,
}

/// Session-level, head-insert tap on other-mouse down/up.
///
/// Lives on the main thread; its run loop source is added to the main run
/// loop in common modes so it keeps firing while menus are tracking.
#[derive(Default)]
pub struct MacEventTap {
    installed: Option<InstalledTap>,
}

impl MacEventTap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventTap for MacEventTap {
    fn install(&mut self, handler: Arc<dyn TapHandler>) -> Result<(), TapError> {
        if self.installed.is_some() {
            return Ok(());
        }

        let context = Box::into_raw(Box::new(TapContext {
            handler,
            port: Cell::new(std::ptr::null_mut()),
        }));
        let mask = event_mask_bit(kCGEventOtherMouseDown) | event_mask_bit(kCGEventOtherMouseUp);

        unsafe {
            let port = CGEventTapCreate(
                kCGSessionEventTap,
                kCGHeadInsertEventTap,
                kCGEventTapOptionDefault,
                mask,
                tap_callback,
                context as *mut c_void,
            );
            if port.is_null() {
                drop(Box::from_raw(context));
                return Err(TapError::CreateFailed);
            }
            (*context).port.set(port);

            let source = CFMachPortCreateRunLoopSource(std::ptr::null(), port, 0);
            if source.is_null() {
                CFMachPortInvalidate(port);
                CFRelease(port);
                drop(Box::from_raw(context));
                return Err(TapError::RunLoopSourceFailed);
            }

            CFRunLoopAddSource(CFRunLoopGetMain(), source, kCFRunLoopCommonModes);
            CGEventTapEnable(port, true);

            self.installed = Some(InstalledTap {
                port,
                source,
                context,
            });
        }
        Ok(())
    }

    fn remove(&mut self) {
        let Some(tap) = self.installed.take() else {
            return;
        };
        unsafe {
            CGEventTapEnable(tap.port, false);
            CFRunLoopRemoveSource(CFRunLoopGetMain(), tap.source, kCFRunLoopCommonModes);
            CFMachPortInvalidate(tap.port);
            CFRelease(tap.source);
            CFRelease(tap.port);
            // The port is invalidated, so the callback can no longer see it
            drop(Box::from_raw(tap.context));
        }
    }
}

impl Drop for MacEventTap {
    fn drop(&mut self) {
        self.remove();
    }
}

fn raw_event(event_type: u32, event: CGEventRef) -> RawEvent {
    match event_type {
        kCGEventOtherMouseDown | kCGEventOtherMouseUp => {
            let direction = if event_type == kCGEventOtherMouseDown {
                ButtonDirection::Down
            } else {
                ButtonDirection::Up
            };
            let code = unsafe { CGEventGetIntegerValueField(event, kCGMouseEventButtonNumber) };
            RawEvent::button(direction, code)
        }
        kCGEventTapDisabledByTimeout => RawEvent::of_kind(RawEventKind::TapDisabledByTimeout),
        _ => RawEvent::of_kind(RawEventKind::Other),
    }
}

unsafe extern "C" fn tap_callback(
    _proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef {
    if user_info.is_null() {
        return event;
    }
    let context = &*(user_info as *const TapContext);

    if event_type == kCGEventTapDisabledByUserInput {
        debug!("event tap disabled by user input");
    }

    match context.handler.handle(&raw_event(event_type, event)) {
        TapVerdict::Forward => event,
        TapVerdict::Suppress => std::ptr::null_mut(),
        TapVerdict::ReenableAndForward => {
            let port = context.port.get();
            if !port.is_null() {
                CGEventTapEnable(port, true);
            }
            event
        }
    }
}
