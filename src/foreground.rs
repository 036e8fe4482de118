//! Foreground application tracking.
//!
//! Holds the latest activation reported by the OS. Updates replace the
//! previous value wholesale; readers on the tap callback get a snapshot
//! without taking a lock.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;

/// Identity of an application as reported by the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForegroundApp {
    pub bundle_identifier: Option<String>,
    pub name: Option<String>,
}

impl ForegroundApp {
    pub fn new(bundle_identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bundle_identifier: Some(bundle_identifier.into()),
            name: Some(name.into()),
        }
    }
}

/// Last-value-wins holder for the foreground application.
#[derive(Debug, Default)]
pub struct ForegroundTracker {
    current: ArcSwapOption<ForegroundApp>,
}

impl ForegroundTracker {
    /// Seed the tracker with whatever is frontmost at start.
    pub fn new(initial: Option<ForegroundApp>) -> Self {
        Self {
            current: ArcSwapOption::from(initial.map(Arc::new)),
        }
    }

    /// Record an activation. Rapid switches are not queued.
    pub fn update(&self, app: ForegroundApp) {
        debug!(
            bundle_id = app.bundle_identifier.as_deref().unwrap_or("-"),
            name = app.name.as_deref().unwrap_or("-"),
            "foreground application changed"
        );
        self.current.store(Some(Arc::new(app)));
    }

    pub fn current(&self) -> Option<Arc<ForegroundApp>> {
        self.current.load_full()
    }

    pub fn bundle_identifier(&self) -> Option<String> {
        self.current().and_then(|app| app.bundle_identifier.clone())
    }

    pub fn name(&self) -> Option<String> {
        self.current().and_then(|app| app.name.clone())
    }
}
