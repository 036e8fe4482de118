//! macOS implementation using CoreGraphics and AppKit via objc2.
//!
//! This module contains all macOS-specific code:
//! - FFI bindings to CoreGraphics, CoreFoundation, ApplicationServices
//! - Input handling (CGEventTap, synthetic key events, NSWorkspace observers)
//! - The agent run loop (NSApplication in accessory mode, NSTimers)
//!
//! None of it makes decisions; everything is delegated to the library core.

pub mod app;
pub mod ffi;
pub mod input;

pub use app::run;
pub use ffi::bridge;
pub use input::{AxTrustChecker, CoreGraphicsSynthesizer, MacEventTap};
