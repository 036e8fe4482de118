//! Command implementations for the `mousemap` binary.
//!
//! Editing commands go through the same `ProfileStore` the agent uses, so
//! a running agent picks the change up on its next config check.

use anyhow::{bail, Context, Result};

use mousemap::model::{
    AppProfile, KeyboardShortcut, MappingAction, MouseButton, MouseModel, PresetAction,
    PresetDispatch,
};
use mousemap::store::{JsonFileStorage, ProfileStore};

fn open(storage: JsonFileStorage) -> ProfileStore {
    ProfileStore::load(Box::new(storage))
}

fn find(store: &ProfileStore, reference: &str) -> Result<AppProfile> {
    store.find_profile(reference).with_context(|| format!("no profile matches {reference:?}"))
}

fn print_profile(profile: &AppProfile, model: MouseModel) {
    let scope = profile.bundle_identifier.as_deref().unwrap_or("(default)");
    println!("{} [{}] {}", profile.name, scope, profile.id);
    let mut active = profile.mappings.iter().filter(|m| m.is_active()).peekable();
    if active.peek().is_none() {
        println!("    no buttons assigned");
    }
    for mapping in active {
        println!(
            "    {:<14} {}",
            mapping.button.display_name_for(model),
            mapping.display_string()
        );
    }
}

#[cfg(target_os = "macos")]
pub fn run_agent(storage: JsonFileStorage) -> Result<()> {
    mousemap::platform::run(storage);
    Ok(())
}

#[cfg(not(target_os = "macos"))]
pub fn run_agent(_storage: JsonFileStorage) -> Result<()> {
    bail!("the remapping agent needs macOS (CGEventTap); only the editing commands work here")
}

pub fn status(storage: JsonFileStorage) -> Result<()> {
    let store = open(storage);
    let config = store.snapshot();
    println!("config:   {}", store.location());
    println!("enabled:  {}", if config.is_enabled { "yes" } else { "no" });
    println!("at login: {}", if config.launch_at_login { "yes" } else { "no" });
    println!("model:    {} ({})", config.mouse_model, config.mouse_model.id());
    println!("profiles: {}", config.profiles.len());
    let active: usize =
        config.profiles.iter().map(|p| p.mappings.iter().filter(|m| m.is_active()).count()).sum();
    println!("mappings: {} ({} assigned)", config.total_mappings(), active);
    Ok(())
}

pub fn profiles(storage: JsonFileStorage) -> Result<()> {
    let store = open(storage);
    let config = store.snapshot();
    for profile in &config.profiles {
        print_profile(profile, config.mouse_model);
    }
    Ok(())
}

pub fn resolve(storage: JsonFileStorage, bundle_id: Option<&str>) -> Result<()> {
    let store = open(storage);
    let profile = store.profile_for(bundle_id);
    print_profile(&profile, store.snapshot().mouse_model);
    Ok(())
}

pub fn add_profile(storage: JsonFileStorage, name: &str, bundle_id: &str) -> Result<()> {
    let store = open(storage);
    if store.snapshot().profiles.iter().any(|p| p.bundle_identifier.as_deref() == Some(bundle_id)) {
        bail!("a profile for {bundle_id} already exists");
    }
    let id = store.add_profile(AppProfile::for_app(name, bundle_id))?;
    println!("{id}");
    Ok(())
}

pub fn remove_profile(storage: JsonFileStorage, reference: &str) -> Result<()> {
    let store = open(storage);
    let profile = find(&store, reference)?;
    store.delete_profile(profile.id)?;
    println!("removed {}", profile.name);
    Ok(())
}

pub fn action_from(shortcut: Option<KeyboardShortcut>, preset: Option<PresetAction>) -> MappingAction {
    match (preset, shortcut) {
        (Some(preset), _) => MappingAction::Preset(preset),
        (None, Some(shortcut)) => MappingAction::Shortcut(shortcut),
        (None, None) => MappingAction::None,
    }
}

pub fn map(
    storage: JsonFileStorage,
    reference: &str,
    button: MouseButton,
    action: MappingAction,
) -> Result<()> {
    let store = open(storage);
    let profile = find(&store, reference)?;
    let model = store.snapshot().mouse_model;
    if !model.available_buttons().contains(&button) {
        eprintln!("note: {} has no {}", model, button.display_name());
    }
    store.update_mapping(profile.id, button, action)?;
    println!("{}: {} → {}", profile.name, button.display_name_for(model), action.display_string());
    Ok(())
}

pub fn set_enabled(storage: JsonFileStorage, enabled: bool) -> Result<()> {
    let store = open(storage);
    store.set_enabled(enabled)?;
    println!("remapping {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub fn set_launch_at_login(storage: JsonFileStorage, launch: bool) -> Result<()> {
    let store = open(storage);
    store.set_launch_at_login(launch)?;
    println!("launch at login {}", if launch { "on" } else { "off" });
    Ok(())
}

pub fn model(storage: JsonFileStorage, model: Option<MouseModel>) -> Result<()> {
    let store = open(storage);
    match model {
        Some(model) => {
            store.set_mouse_model(model)?;
            println!("mouse model: {model}");
        },
        None => {
            let current = store.snapshot().mouse_model;
            for model in MouseModel::ALL {
                let marker = if model == current { '*' } else { ' ' };
                let buttons: Vec<_> = model
                    .available_buttons()
                    .iter()
                    .map(|b| b.display_name_for(model))
                    .collect();
                println!(
                    "{marker} {:<14} {:<22} {:<12} {}",
                    model.id(),
                    model.display_name(),
                    model.category(),
                    buttons.join(", ")
                );
            }
        },
    }
    Ok(())
}

pub fn presets() {
    for preset in PresetAction::ALL {
        let dispatch = match preset.dispatch() {
            PresetDispatch::Dock(identifier) => format!("dock {identifier}"),
            PresetDispatch::Shortcut(shortcut) => format!("keys {shortcut}"),
        };
        println!(
            "{:<20} {:<22} {:<11} {}",
            preset.id(),
            preset.display_name(),
            preset.category(),
            dispatch
        );
    }
}
