//! FFI binding for Dock gesture notifications.
//!
//! `CoreDockSendNotification` is a private symbol exported by the
//! ApplicationServices umbrella. It is fire-and-forget: the return value
//! carries no useful status.

use std::ffi::c_void;

use super::bridge::nsstring;
use super::coregraphics::CFStringRef;
use objc2::rc::Retained;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn CoreDockSendNotification(notification: CFStringRef, unknown: *mut c_void) -> i32;
}

/// Ask the Dock to perform the gesture named by `identifier`
/// (e.g. `com.apple.expose.awake`).
pub fn send_dock_notification(identifier: &str) {
    // NSString is toll-free bridged to CFString
    let name = nsstring(identifier);
    unsafe {
        CoreDockSendNotification(Retained::as_ptr(&name) as CFStringRef, std::ptr::null_mut());
    }
}
