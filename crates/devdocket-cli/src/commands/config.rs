use clap::Subcommand;
use devdocket_core::{Config, ConfigError};
use serde_json::json;

use crate::shell::{CliResult, Shell};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "timer.default_minutes", "storage.bug_vault")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current mode
    Show,
    /// Switch between dark and light mode
    Toggle,
}

pub fn run(shell: &mut Shell, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = shell
                .config
                .get(&key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
            shell.emit(&json!({ "key": key, "value": value }), |_| println!("{value}"))?;
        }
        ConfigAction::Set { key, value } => {
            shell.config.set(&key, &value)?;
            shell.config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            if shell.json {
                println!("{}", serde_json::to_string_pretty(&shell.config)?);
            } else {
                print!("{}", toml::to_string_pretty(&shell.config)?);
            }
        }
        ConfigAction::Reset => {
            shell.config = Config::default();
            shell.config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

pub fn run_theme(shell: &mut Shell, action: ThemeAction) -> CliResult {
    if let ThemeAction::Toggle = action {
        shell.config.toggle_dark_mode();
        shell.config.save()?;
    }
    let mode = mode_name(shell.config.ui.dark_mode);
    shell.emit(&json!({ "mode": mode, "darkMode": shell.config.ui.dark_mode }), |_| {
        println!("{mode}")
    })
}
