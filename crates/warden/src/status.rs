// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden status` command implementation.
//!
//! Reads the persisted stores and displays the score, success rate, and
//! store counts. `--json` outputs structured JSON for scripting.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use warden_config::WardenConfig;
use warden_core::WardenError;
use warden_store::{CommandTable, InteractionStore, UserDirectory};

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub score: i64,
    pub success_rate: f64,
    pub interactions: usize,
    pub tracked_users: usize,
    pub commands: usize,
    pub data_dir: String,
}

/// Run the `warden status` command.
pub fn run_status(config: &WardenConfig, json: bool) -> Result<(), WardenError> {
    let report = build_report(config);

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| WardenError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", "warden status".bold());
    println!("  🎯 Score:        {}", report.score);
    println!("  Success rate:   {:.1}%", report.success_rate);
    println!("  Interactions:   {}", report.interactions);
    println!("  Tracked users:  {}", report.tracked_users);
    println!("  Commands:       {}", report.commands);
    println!("  Data dir:       {}", report.data_dir.dimmed());
    Ok(())
}

fn build_report(config: &WardenConfig) -> StatusReport {
    let data_dir = PathBuf::from(&config.store.data_dir);
    let cap = config.limits.history_cap;

    let interactions = InteractionStore::load(data_dir.join("interactions.json"), cap);
    let users = UserDirectory::load(data_dir.join("users.json"), cap);
    let commands = CommandTable::load(data_dir.join("commands.json"), config.limits.max_commands);

    StatusReport {
        score: interactions.score(),
        success_rate: interactions.success_rate(),
        interactions: interactions.len(),
        tracked_users: users.len(),
        commands: commands.len(),
        data_dir: config.store.data_dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_empty_stores() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = WardenConfig::default();
        config.store.data_dir = dir.path().to_string_lossy().into_owned();

        let report = build_report(&config);
        assert_eq!(report.score, 0);
        assert_eq!(report.interactions, 0);
        assert_eq!(report.tracked_users, 0);
        assert_eq!(report.commands, 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = WardenConfig::default();
        config.store.data_dir = dir.path().to_string_lossy().into_owned();

        let report = build_report(&config);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 0);
        assert!(json["data_dir"].is_string());
    }
}
