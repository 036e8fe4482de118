//! Accessibility trust via ApplicationServices.

use crate::permission::TrustChecker;
use crate::platform::macos::ffi::{is_process_trusted, prompt_for_accessibility};

#[derive(Debug, Default, Clone, Copy)]
pub struct AxTrustChecker;

impl TrustChecker for AxTrustChecker {
    fn is_trusted(&self) -> bool {
        is_process_trusted()
    }

    fn request_trust(&self) -> bool {
        // Called from the main thread inside the app's autorelease pool
        unsafe { prompt_for_accessibility() }
    }
}
