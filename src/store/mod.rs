//! Profile store: the single owner of the configuration document.
//!
//! Readers (the tap callback in particular) take an `Arc` snapshot and
//! never block. Every mutation builds a complete new document, swaps it in
//! with one store, then writes it through to storage. A reader therefore
//! sees either the old or the new document, never a partial one.

pub mod storage;
pub mod watch;

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{AppConfiguration, AppProfile, MappingAction, MouseButton, MouseModel};

pub use storage::{default_config_path, ConfigStorage, JsonFileStorage};
pub use watch::{ConfigChange, ConfigWatcher};

/// Owner of the in-memory configuration and its storage.
pub struct ProfileStore {
    config: ArcSwap<AppConfiguration>,
    // Also serializes writers: one mutation at a time.
    storage: Mutex<Box<dyn ConfigStorage>>,
}

impl ProfileStore {
    /// Load the document from `storage`.
    ///
    /// A missing, unreadable or unparsable document is replaced by the
    /// default configuration. Nothing is written until the first mutation.
    pub fn load(storage: Box<dyn ConfigStorage>) -> Self {
        let config = match read_document(storage.as_ref()) {
            Ok(Some(config)) => {
                info!(
                    location = %storage.describe(),
                    profiles = config.profiles.len(),
                    "configuration loaded"
                );
                config
            }
            Ok(None) => {
                info!(location = %storage.describe(), "no configuration found, using defaults");
                AppConfiguration::default()
            }
            Err(e) => {
                warn!(location = %storage.describe(), "configuration unusable, using defaults: {e}");
                AppConfiguration::default()
            }
        };
        Self::with_configuration(storage, config)
    }

    /// Start from a known document without reading storage.
    pub fn with_configuration(storage: Box<dyn ConfigStorage>, mut config: AppConfiguration) -> Self {
        config.normalize();
        Self {
            config: ArcSwap::from_pointee(config),
            storage: Mutex::new(storage),
        }
    }

    /// Immutable view of the current document.
    pub fn snapshot(&self) -> Arc<AppConfiguration> {
        self.config.load_full()
    }

    pub fn location(&self) -> String {
        self.storage.lock().describe()
    }

    /// Profile for the given application, else the default profile.
    pub fn profile_for(&self, bundle_identifier: Option<&str>) -> AppProfile {
        self.config.load().profile_for(bundle_identifier)
    }

    pub fn default_profile(&self) -> AppProfile {
        self.config.load().default_profile()
    }

    /// Look up a profile by `default`, id, bundle identifier or name
    /// (case-insensitive), in that order.
    pub fn find_profile(&self, reference: &str) -> Option<AppProfile> {
        let config = self.config.load();
        let reference = reference.trim();
        if reference.eq_ignore_ascii_case("default") {
            return Some(config.default_profile());
        }
        if let Ok(id) = reference.parse::<Uuid>() {
            if let Some(p) = config.profile(id) {
                return Some(p.clone());
            }
        }
        config
            .profiles
            .iter()
            .find(|p| p.bundle_identifier.as_deref() == Some(reference))
            .or_else(|| {
                config
                    .profiles
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(reference))
            })
            .cloned()
    }

    /// Append an application profile. Returns its id.
    pub fn add_profile(&self, profile: AppProfile) -> Result<Uuid, StoreError> {
        if profile.is_default() {
            return Err(StoreError::DuplicateDefault);
        }
        let id = profile.id;
        let name = profile.name.clone();
        self.mutate(|config| {
            config.profiles.push(profile);
            Ok(())
        })?;
        info!(%id, %name, "profile added");
        Ok(id)
    }

    /// Replace the profile with the same id.
    pub fn update_profile(&self, profile: AppProfile) -> Result<(), StoreError> {
        self.mutate(|config| {
            let idx = config
                .profiles
                .iter()
                .position(|p| p.id == profile.id)
                .ok_or(StoreError::UnknownProfile(profile.id))?;
            if profile.is_default() && !config.profiles[idx].is_default() {
                return Err(StoreError::DuplicateDefault);
            }
            config.profiles[idx] = profile;
            Ok(())
        })
    }

    /// Remove an application profile. The default profile cannot be removed.
    pub fn delete_profile(&self, id: Uuid) -> Result<(), StoreError> {
        self.mutate(|config| {
            let idx = config
                .profiles
                .iter()
                .position(|p| p.id == id)
                .ok_or(StoreError::UnknownProfile(id))?;
            if config.profiles[idx].is_default() {
                return Err(StoreError::DefaultProfileUndeletable);
            }
            config.profiles.remove(idx);
            Ok(())
        })?;
        info!(%id, "profile deleted");
        Ok(())
    }

    /// Set the action for `button` in profile `profile_id`, overwriting an
    /// existing mapping or appending a new one. `MappingAction::None`
    /// clears the assignment.
    pub fn update_mapping(
        &self,
        profile_id: Uuid,
        button: MouseButton,
        action: MappingAction,
    ) -> Result<(), StoreError> {
        self.mutate(|config| {
            let profile = config
                .profiles
                .iter_mut()
                .find(|p| p.id == profile_id)
                .ok_or(StoreError::UnknownProfile(profile_id))?;
            profile.set_action(button, action);
            Ok(())
        })?;
        debug!(%profile_id, button = button.code(), action = %action.display_string(), "mapping updated");
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.mutate(|config| {
            config.is_enabled = enabled;
            Ok(())
        })
    }

    /// Stores the flag only; registering a login item is up to the shell.
    pub fn set_launch_at_login(&self, launch: bool) -> Result<(), StoreError> {
        self.mutate(|config| {
            config.launch_at_login = launch;
            Ok(())
        })
    }

    pub fn set_mouse_model(&self, model: MouseModel) -> Result<(), StoreError> {
        self.mutate(|config| {
            config.mouse_model = model;
            Ok(())
        })
    }

    /// Re-read storage and swap in its document.
    ///
    /// Returns whether the in-memory document changed. A document that
    /// fails to parse is rejected and the current one kept; a deleted
    /// document resets to defaults.
    pub fn reload(&self) -> Result<bool, StoreError> {
        let storage = self.storage.lock();
        let next = read_document(storage.as_ref())?.unwrap_or_default();
        if *self.config.load_full() == next {
            return Ok(false);
        }
        self.config.store(Arc::new(next));
        info!(location = %storage.describe(), "configuration reloaded");
        Ok(true)
    }

    /// Write the current document to storage.
    pub fn save(&self) -> Result<(), StoreError> {
        let storage = self.storage.lock();
        storage.write(&self.config.load().to_json()?)
    }

    fn mutate<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut AppConfiguration) -> Result<(), StoreError>,
    {
        let storage = self.storage.lock();
        let mut next = AppConfiguration::clone(&self.config.load());
        f(&mut next)?;
        next.normalize();
        let text = next.to_json()?;
        self.config.store(Arc::new(next));
        storage.write(&text)
    }
}

fn read_document(storage: &dyn ConfigStorage) -> Result<Option<AppConfiguration>, StoreError> {
    let Some(text) = storage.read()? else {
        return Ok(None);
    };
    let mut config: AppConfiguration = serde_json::from_str(&text)?;
    let dropped = config.normalize();
    if !dropped.is_empty() {
        warn!(location = %storage.describe(), ?dropped, "ignoring extra default profiles");
    }
    Ok(Some(config))
}
