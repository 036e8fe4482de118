//! Button mappings, per-application profiles and the root configuration
//! document.
//!
//! The in-memory model carries a mapping's action as one tagged variant.
//! On disk the document keeps the flat `shortcut` / `systemAction` fields,
//! converted at the serde boundary by [`MappingRecord`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::buttons::{MouseButton, MouseModel};
use super::constants::{DEFAULT_PROFILE_NAME, UNASSIGNED_LABEL};
use super::preset::PresetAction;
use super::shortcut::KeyboardShortcut;

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingAction {
    #[default]
    None,
    Shortcut(KeyboardShortcut),
    Preset(PresetAction),
}

impl MappingAction {
    pub fn is_active(&self) -> bool {
        !matches!(self, MappingAction::None)
    }

    pub fn display_string(&self) -> String {
        match self {
            MappingAction::None => UNASSIGNED_LABEL.to_string(),
            MappingAction::Shortcut(sc) => sc.display_string(),
            MappingAction::Preset(p) => p.display_name().to_string(),
        }
    }
}

/// One button's assignment within a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MappingRecord", into = "MappingRecord")]
pub struct ButtonMapping {
    pub id: Uuid,
    pub button: MouseButton,
    pub action: MappingAction,
}

impl ButtonMapping {
    pub fn new(button: MouseButton, action: MappingAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            button,
            action,
        }
    }

    /// An unassigned mapping for `button`.
    pub fn unassigned(button: MouseButton) -> Self {
        Self::new(button, MappingAction::None)
    }

    pub fn is_active(&self) -> bool {
        self.action.is_active()
    }

    pub fn display_string(&self) -> String {
        self.action.display_string()
    }
}

/// Persisted shape of a [`ButtonMapping`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MappingRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    button: MouseButton,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shortcut: Option<KeyboardShortcut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_action: Option<PresetAction>,
}

impl From<MappingRecord> for ButtonMapping {
    fn from(r: MappingRecord) -> Self {
        // A preset wins when both are set; it is also what dispatch would pick.
        let action = match (r.system_action, r.shortcut) {
            (Some(p), _) => MappingAction::Preset(p),
            (None, Some(sc)) => MappingAction::Shortcut(sc),
            (None, None) => MappingAction::None,
        };
        ButtonMapping {
            id: r.id,
            button: r.button,
            action,
        }
    }
}

impl From<ButtonMapping> for MappingRecord {
    fn from(m: ButtonMapping) -> Self {
        let (shortcut, system_action) = match m.action {
            MappingAction::None => (None, None),
            MappingAction::Shortcut(sc) => (Some(sc), None),
            MappingAction::Preset(p) => (None, Some(p)),
        };
        MappingRecord {
            id: m.id,
            button: m.button,
            shortcut,
            system_action,
        }
    }
}

/// A named set of mappings, optionally scoped to one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProfile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_identifier: Option<String>,
    #[serde(default)]
    pub mappings: Vec<ButtonMapping>,
}

impl AppProfile {
    /// A profile scoped to `bundle_identifier` with no mappings.
    pub fn for_app(name: impl Into<String>, bundle_identifier: impl Into<String>) -> Self {
        let bid = bundle_identifier.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bundle_identifier: if bid.is_empty() { None } else { Some(bid) },
            mappings: Vec::new(),
        }
    }

    /// The out-of-the-box default profile: every known button listed,
    /// only button 5 assigned (Mission Control).
    pub fn make_default() -> Self {
        let mappings = MouseButton::ALL
            .into_iter()
            .map(|button| {
                if button == MouseButton::Button5 {
                    ButtonMapping::new(button, MappingAction::Preset(PresetAction::MissionControl))
                } else {
                    ButtonMapping::unassigned(button)
                }
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            name: DEFAULT_PROFILE_NAME.to_string(),
            bundle_identifier: None,
            mappings,
        }
    }

    /// True for the profile used when no app-specific profile matches.
    pub fn is_default(&self) -> bool {
        self.bundle_identifier.as_deref().map_or(true, str::is_empty)
    }

    pub fn mapping_for(&self, button: MouseButton) -> Option<&ButtonMapping> {
        self.mappings.iter().find(|m| m.button == button)
    }

    /// The active mapping for `button`, if any.
    pub fn active_mapping(&self, button: MouseButton) -> Option<&ButtonMapping> {
        self.mapping_for(button).filter(|m| m.is_active())
    }

    /// Overwrite the action for `button`, appending a mapping if absent.
    pub fn set_action(&mut self, button: MouseButton, action: MappingAction) {
        match self.mappings.iter_mut().find(|m| m.button == button) {
            Some(existing) => existing.action = action,
            None => self.mappings.push(ButtonMapping::new(button, action)),
        }
    }
}

fn default_true() -> bool {
    true
}

/// The root persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfiguration {
    #[serde(default)]
    pub profiles: Vec<AppProfile>,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub launch_at_login: bool,
    #[serde(default)]
    pub mouse_model: MouseModel,
}

impl Default for AppConfiguration {
    fn default() -> Self {
        Self {
            profiles: vec![AppProfile::make_default()],
            is_enabled: true,
            launch_at_login: false,
            mouse_model: MouseModel::default(),
        }
    }
}

impl AppConfiguration {
    /// Parse a document, then repair the default-profile invariant.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfiguration = serde_json::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    /// Pretty-printed JSON with keys in sorted order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        // serde_json::Value maps are ordered by key
        let value = serde_json::to_value(self)?;
        serde_json::to_string_pretty(&value)
    }

    /// Empty identifiers become absent. Exactly one default profile
    /// remains: the first one wins, later ones are dropped, and one is
    /// inserted at the front when none exists.
    ///
    /// Returns the names of the dropped profiles.
    pub fn normalize(&mut self) -> Vec<String> {
        for profile in &mut self.profiles {
            if profile.bundle_identifier.as_deref() == Some("") {
                profile.bundle_identifier = None;
            }
        }
        let mut dropped = Vec::new();
        let mut seen_default = false;
        self.profiles.retain(|p| {
            if !p.is_default() {
                return true;
            }
            if seen_default {
                dropped.push(p.name.clone());
                return false;
            }
            seen_default = true;
            true
        });
        if !seen_default {
            self.profiles.insert(0, AppProfile::make_default());
        }
        dropped
    }

    /// The default profile; synthesized if the document lacks one.
    pub fn default_profile(&self) -> AppProfile {
        self.profiles
            .iter()
            .find(|p| p.is_default())
            .cloned()
            .unwrap_or_else(AppProfile::make_default)
    }

    /// First profile scoped to `bundle_identifier`, else the default.
    /// Absent or empty identifiers always resolve to the default.
    pub fn profile_for(&self, bundle_identifier: Option<&str>) -> AppProfile {
        self.profile_ref_for(bundle_identifier)
            .cloned()
            .unwrap_or_else(AppProfile::make_default)
    }

    /// Borrowing form of [`profile_for`](Self::profile_for); `None` only
    /// when no default profile exists either.
    pub fn profile_ref_for(&self, bundle_identifier: Option<&str>) -> Option<&AppProfile> {
        let matched = bundle_identifier.filter(|bid| !bid.is_empty()).and_then(|bid| {
            self.profiles
                .iter()
                .find(|p| p.bundle_identifier.as_deref() == Some(bid))
        });
        matched.or_else(|| self.profiles.iter().find(|p| p.is_default()))
    }

    pub fn profile(&self, id: Uuid) -> Option<&AppProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn total_mappings(&self) -> usize {
        self.profiles.iter().map(|p| p.mappings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keycodes::KC_C;
    use crate::model::shortcut::ModifierFlags;

    #[test]
    fn default_profile_assigns_only_button5() {
        let p = AppProfile::make_default();
        assert!(p.is_default());
        assert_eq!(p.mappings.len(), MouseButton::ALL.len());
        let active: Vec<_> = p.mappings.iter().filter(|m| m.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].button, MouseButton::Button5);
        assert_eq!(active[0].action, MappingAction::Preset(PresetAction::MissionControl));
    }

    #[test]
    fn legacy_record_with_both_fields_prefers_preset() {
        let json = r#"{"button": 3, "shortcut": {"keyCode": 8, "modifiers": {"command": true}},
                       "systemAction": "copy"}"#;
        let m: ButtonMapping = serde_json::from_str(json).unwrap();
        assert_eq!(m.action, MappingAction::Preset(PresetAction::Copy));
    }

    #[test]
    fn unassigned_mapping_omits_action_fields() {
        let m = ButtonMapping::unassigned(MouseButton::Back);
        let v = serde_json::to_value(&m).unwrap();
        assert!(v.get("shortcut").is_none());
        assert!(v.get("systemAction").is_none());
        assert_eq!(v["button"], 3);
    }

    #[test]
    fn mapping_display_strings() {
        let sc = KeyboardShortcut::new(KC_C, ModifierFlags::COMMAND);
        assert_eq!(MappingAction::Shortcut(sc).display_string(), "\u{2318}C");
        assert_eq!(MappingAction::Preset(PresetAction::Undo).display_string(), "Undo");
        assert_eq!(MappingAction::None.display_string(), "Not assigned");
    }

    #[test]
    fn set_action_overwrites_then_appends() {
        let mut p = AppProfile::for_app("Foo", "com.example.Foo");
        p.set_action(MouseButton::Back, MappingAction::Preset(PresetAction::Copy));
        p.set_action(MouseButton::Back, MappingAction::Preset(PresetAction::Paste));
        assert_eq!(p.mappings.len(), 1);
        assert_eq!(p.mappings[0].action, MappingAction::Preset(PresetAction::Paste));
        p.set_action(MouseButton::Back, MappingAction::None);
        assert!(p.active_mapping(MouseButton::Back).is_none());
    }

    #[test]
    fn normalize_inserts_missing_default_first() {
        let mut c = AppConfiguration {
            profiles: vec![AppProfile::for_app("Foo", "com.example.Foo")],
            ..Default::default()
        };
        c.normalize();
        assert_eq!(c.profiles.len(), 2);
        assert!(c.profiles[0].is_default());
    }

    #[test]
    fn normalize_keeps_only_first_default() {
        let mut c = AppConfiguration::default();
        c.profiles.push(AppProfile::for_app("Foo", "com.example.Foo"));
        c.profiles.push(AppProfile::for_app("Second", ""));
        let first = c.profiles[0].id;

        assert_eq!(c.normalize(), vec!["Second".to_string()]);
        assert_eq!(c.profiles.len(), 2);
        assert_eq!(c.default_profile().id, first);
        assert!(c.normalize().is_empty());
    }

    #[test]
    fn missing_flags_take_defaults() {
        let c = AppConfiguration::from_json(r#"{"profiles": []}"#).unwrap();
        assert!(c.is_enabled);
        assert!(!c.launch_at_login);
        assert_eq!(c.mouse_model, MouseModel::MxMaster3);
        assert_eq!(c.profiles.len(), 1);
    }

    #[test]
    fn to_json_sorts_keys() {
        let json = AppConfiguration::default().to_json().unwrap();
        let enabled = json.find("\"isEnabled\"").unwrap();
        let launch = json.find("\"launchAtLogin\"").unwrap();
        let model = json.find("\"mouseModel\"").unwrap();
        let profiles = json.find("\"profiles\"").unwrap();
        assert!(enabled < launch && launch < model && model < profiles);
    }
}
