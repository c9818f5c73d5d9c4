// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document persistence shared by the stores.
//!
//! Load failures fall back to defaults and save failures keep the in-memory
//! mutation (at-most-once durability); neither path is allowed to block
//! startup or a running conversation.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Loads a JSON document, returning the type's default when the file is
/// missing or unreadable.
pub(crate) fn load_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to decode state document, starting empty");
                T::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read state document, starting empty");
            T::default()
        }
    }
}

/// Writes a JSON document synchronously, logging (but swallowing) failures.
pub(crate) fn save_document<T: Serialize>(path: &Path, value: &T) {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %path.display(), error = %e, "failed to create state directory");
        return;
    }
    let raw = match serde_json::to_string_pretty(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to encode state document");
            return;
        }
    };
    if let Err(e) = std::fs::write(path, raw) {
        warn!(path = %path.display(), error = %e, "failed to write state document");
    }
}
