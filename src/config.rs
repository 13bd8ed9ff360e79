//! Typed configuration loaded from the YAML file named on the command line.
//! Defaults cover every tunable so a minimal config only needs the Discord
//! token and the database parameters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("unable to parse config from {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Connection parameters for the registration database.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord_token: String,
    pub db_config: DbConfig,

    /// Name of the role required for the moderator command family.
    #[serde(default = "default_moderator_role")]
    pub moderator_role: String,

    /// Channel names where commands are honored; empty means everywhere.
    #[serde(default)]
    pub command_channels: Vec<String>,

    #[serde(default = "default_reconciliation_interval_secs")]
    pub reconciliation_interval_secs: u64,

    /// Hard per-message length ceiling imposed by the transport.
    #[serde(default = "default_message_length_limit")]
    pub message_length_limit: usize,

    /// Most FSAs a single add/del/send may name. Protects storage writes.
    #[serde(default = "default_max_fsas_per_command")]
    pub max_fsas_per_command: usize,

    /// Stricter ceiling on broadcast targeting. Protects ping fan-out.
    #[serde(default = "default_max_fsas_per_send")]
    pub max_fsas_per_send: usize,

    #[serde(default = "default_help_text")]
    pub help_text: String,

    // Settings for the monitor/export tool.
    #[serde(default = "default_monitoring_interval_secs")]
    pub monitoring_interval_secs: u64,
    #[serde(default)]
    pub export_output_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

fn default_moderator_role() -> String {
    "ppmod".to_string()
}

fn default_reconciliation_interval_secs() -> u64 {
    3600
}

fn default_message_length_limit() -> usize {
    2000
}

fn default_max_fsas_per_command() -> usize {
    999
}

fn default_max_fsas_per_send() -> usize {
    100
}

fn default_monitoring_interval_secs() -> u64 {
    60
}

fn default_help_text() -> String {
    "Commands: !ppadd area1 area2 ... | !ppdel area1 area2 ... | !ppstop | !pplist | !pphelp. \
     Moderator commands: !ppuseradd user1#1001 area1 ... | !ppuserdel user1#1001 area1 ... | \
     !ppuserstop user1#1001 | !ppuserlist user1#1001 | !ppsend area1 area2 ..."
        .to_string()
}
