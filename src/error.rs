//! Typed error variants for the library.
//!
//! None of these is fatal to the agent: store failures fall back to
//! defaults or keep the previous document, tap failures leave remapping
//! inactive, synthesis failures drop the single action.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when loading or saving the configuration document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the document failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded or decoded.
    #[error("invalid configuration document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No profile with this id exists.
    #[error("no profile with id {0}")]
    UnknownProfile(Uuid),

    /// A second profile without an application identifier was submitted.
    #[error("only one default profile may exist; give the profile a bundle identifier")]
    DuplicateDefault,

    /// The default profile is required and can never be removed.
    #[error("the default profile cannot be deleted")]
    DefaultProfileUndeletable,

    /// The configuration directory could not be watched.
    #[error("failed to watch configuration: {0}")]
    Watch(#[from] notify::Error),

    /// Neither an override nor a platform data directory is available.
    #[error("could not determine a configuration location")]
    NoConfigLocation,
}

/// The OS refused to install the global input listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapError {
    /// Commonly caused by missing accessibility trust.
    #[error("failed to create event tap (is Accessibility access granted?)")]
    CreateFailed,

    #[error("failed to create run loop source for event tap")]
    RunLoopSourceFailed,
}

/// The OS refused to build a synthetic input event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    #[error("event source unavailable")]
    SourceUnavailable,

    #[error("failed to create key event for key code {0}")]
    EventCreationFailed(u16),
}
