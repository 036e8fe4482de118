//! Application constants and default values.
//!
//! This module contains file locations, timer intervals and the
//! defaults used when no configuration document exists.

use std::time::Duration;

// === Storage ===

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "Mousemap";

/// File name of the persisted configuration document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the configuration path.
pub const CONFIG_PATH_ENV: &str = "MOUSEMAP_CONFIG";

// === Timers ===

/// Interval between accessibility trust checks while untrusted.
pub const TRUST_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Interval at which the file watcher polls the configuration directory.
pub const CONFIG_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Changes closer together than this are reported once.
pub const CONFIG_DEBOUNCE: Duration = Duration::from_millis(200);

/// Interval at which the main loop picks up queued configuration changes.
pub const CONFIG_WATCH_INTERVAL: Duration = Duration::from_millis(500);

/// Interval at which the main loop drains the event bus.
pub const EVENT_DRAIN_INTERVAL: Duration = Duration::from_millis(250);

// === Defaults ===

/// Name given to the profile without an application identifier.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Label shown for a mapping with no action assigned.
pub const UNASSIGNED_LABEL: &str = "Not assigned";
