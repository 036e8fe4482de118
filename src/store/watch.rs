//! Detects edits made to the configuration file by another process
//! (typically the `mousemap` CLI while the agent is running).
//!
//! The parent directory is watched rather than the file itself: the
//! document may not exist yet, and atomic saves replace it by rename.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, trace};

use crate::error::StoreError;

/// The configuration document changed on disk.
#[derive(Debug, Clone)]
pub struct ConfigChange {
    pub path: PathBuf,
    pub kind: EventKind,
}

/// Watches the configuration file and queues change events for the main loop.
pub struct ConfigWatcher {
    // Kept alive to keep polling.
    _watcher: PollWatcher,
    events: Receiver<ConfigChange>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher").finish_non_exhaustive()
    }
}

impl ConfigWatcher {
    /// Start watching `config_path`, polling every `poll_interval` and
    /// coalescing events closer together than `debounce`.
    ///
    /// The parent directory is created if missing.
    pub fn new(config_path: &Path, poll_interval: Duration, debounce: Duration) -> Result<Self, StoreError> {
        let parent = match config_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|source| StoreError::Io { path: parent.clone(), source })?;
        let parent = parent.canonicalize().unwrap_or(parent);

        let file_name: OsString = config_path
            .file_name()
            .ok_or(StoreError::NoConfigLocation)?
            .to_os_string();
        let path = parent.join(&file_name);

        let (tx, rx) = channel::<ConfigChange>();
        let mut debouncer = Debouncer::new(debounce);

        let mut watcher = PollWatcher::new(
            move |result: notify::Result<Event>| {
                let event = match result {
                    Ok(event) => event,
                    Err(e) => {
                        error!("config watcher error: {e}");
                        return;
                    }
                };
                if !concerns_file(&event, &file_name) {
                    return;
                }
                if !debouncer.admit(Instant::now()) {
                    trace!("debouncing config change");
                    return;
                }
                let change = ConfigChange { path: path.clone(), kind: event.kind };
                debug!(path = %change.path.display(), kind = ?change.kind, "config file changed");
                if let Err(e) = tx.send(change) {
                    error!("failed to queue config change: {e}");
                }
            },
            NotifyConfig::default().with_poll_interval(poll_interval),
        )?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        debug!(dir = %parent.display(), "watching configuration directory");

        Ok(Self { _watcher: watcher, events: rx })
    }

    /// Next queued change, if any (non-blocking).
    pub fn try_recv(&self) -> Option<ConfigChange> {
        self.events.try_recv().ok()
    }

    /// Drain every queued change. True if there was at least one.
    pub fn pending(&self) -> bool {
        let mut any = false;
        while self.try_recv().is_some() {
            any = true;
        }
        any
    }
}

/// Modify, create or remove events that name the configuration file.
fn concerns_file(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_))
        && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}

/// Admits at most one event per `delay`.
#[derive(Debug)]
struct Debouncer {
    delay: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.delay => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
