// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden doctor` command implementation.
//!
//! Prints a configuration summary and probes the environment: store
//! directory writability and Ollama reachability.

use std::path::Path;

use colored::Colorize;
use warden_config::WardenConfig;
use warden_core::types::HealthStatus;
use warden_core::{LanguageModel, WardenError};
use warden_ollama::OllamaModel;

/// Run the `warden doctor` command.
pub async fn run_doctor(config: &WardenConfig) -> Result<(), WardenError> {
    println!("{}", "warden doctor".bold());
    println!("  Bot channel:  #{}", config.agent.bot_channel);
    println!("  Ollama:       {} ({})", config.ollama.base_url, config.ollama.model);
    println!("  Data dir:     {}", config.store.data_dir);
    println!();

    report_check(
        "store directory writable",
        check_data_dir(Path::new(&config.store.data_dir)),
    );

    let ollama_result = match OllamaModel::new(&config.ollama) {
        Ok(model) => match model.health_check().await? {
            HealthStatus::Healthy => Ok(()),
            HealthStatus::Degraded(cause) | HealthStatus::Unhealthy(cause) => Err(cause),
        },
        Err(e) => Err(e.to_string()),
    };
    report_check("ollama reachable", ollama_result);

    Ok(())
}

fn check_data_dir(dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let probe = dir.join(".doctor-probe");
    std::fs::write(&probe, b"ok").map_err(|e| format!("cannot write to {}: {e}", dir.display()))?;
    std::fs::remove_file(&probe).ok();
    Ok(())
}

fn report_check(label: &str, result: Result<(), String>) {
    match result {
        Ok(()) => println!("  {} {label}", "✓".green()),
        Err(cause) => println!("  {} {label}: {cause}", "✗".red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_directory_passes_the_check() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(dir.path()).is_ok());
    }

    #[test]
    fn unwritable_path_fails_the_check() {
        // A file cannot act as the data directory.
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        assert!(check_data_dir(&file).is_err());
    }
}
