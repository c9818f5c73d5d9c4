// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic command table: a data-driven map interpreted at invocation time.
//!
//! Commands are plain `{description, response}` records; the response is a
//! template rendered with `{args}` / `${input}` substitution. No callables
//! are generated at registration time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persist;

/// One registered dynamic command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub description: String,
    pub response: String,
}

/// Registered dynamic commands, persisted as `{name -> {description, response}}`.
#[derive(Debug)]
pub struct CommandTable {
    path: PathBuf,
    max: usize,
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandTable {
    /// Loads the table from `path`, defaulting to empty on any load failure.
    pub fn load(path: PathBuf, max: usize) -> Self {
        let commands = persist::load_document(&path);
        Self {
            path,
            max,
            commands,
        }
    }

    /// Registers a command, replacing any existing one of the same name.
    ///
    /// The returned error string is suitable for user display.
    pub fn create(&mut self, name: &str, description: &str, response: &str) -> Result<(), String> {
        if !Self::name_is_valid(name) {
            return Err(
                "command name may only contain letters, numbers, underscores, and dashes"
                    .to_string(),
            );
        }
        if !self.commands.contains_key(name) && self.commands.len() >= self.max {
            return Err(format!(
                "command limit reached ({} commands max)",
                self.max
            ));
        }
        self.commands.insert(
            name.to_string(),
            CommandSpec {
                description: description.to_string(),
                response: response.to_string(),
            },
        );
        self.save();
        Ok(())
    }

    /// Unregisters a command.
    pub fn remove(&mut self, name: &str) -> Result<(), String> {
        if self.commands.remove(name).is_none() {
            return Err(format!("command `{name}` does not exist"));
        }
        self.save();
        Ok(())
    }

    /// Renders a command's response template against the given arguments.
    ///
    /// Returns `None` when the command is not registered.
    pub fn render(&self, name: &str, args: &str) -> Option<String> {
        self.commands
            .get(name)
            .map(|spec| spec.response.replace("{args}", args).replace("${input}", args))
    }

    /// Formatted listing of all registered commands.
    pub fn list_text(&self) -> String {
        if self.commands.is_empty() {
            return "No commands available.".to_string();
        }
        let mut out = String::from("**Available commands:**\n");
        for (name, spec) in &self.commands {
            out.push_str(&format!("• /{name} - {}\n", spec.description));
        }
        out
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn name_is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    fn save(&self) {
        persist::save_document(&self.path, &self.commands);
    }
}
