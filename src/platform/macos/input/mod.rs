//! Input handling: the global event tap, key synthesis, the trust check
//! and NSWorkspace observers.

pub mod event_tap;
pub mod observers;
pub mod synth;
pub mod trust;

// Re-export commonly used items
pub use event_tap::MacEventTap;
pub use observers::{frontmost_application, install_activation_observer, schedule_repeating};
pub use synth::CoreGraphicsSynthesizer;
pub use trust::AxTrustChecker;
