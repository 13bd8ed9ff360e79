//! Config parsing: minimal files get defaults, full files override them.

use postal_pinger_bot::config::Config;

const MINIMAL: &str = r#"
discord_token: "token"
db_config:
  host: "localhost"
  port: 5432
  user: "bot"
  pass: "secret"
  name: "pings"
"#;

#[test]
fn minimal_config_fills_in_defaults() {
    let config: Config = serde_yaml::from_str(MINIMAL).expect("minimal config parses");
    assert_eq!(config.discord_token, "token");
    assert_eq!(config.db_config.port, 5432);
    assert_eq!(config.moderator_role, "ppmod");
    assert!(config.command_channels.is_empty());
    assert_eq!(config.reconciliation_interval_secs, 3600);
    assert_eq!(config.message_length_limit, 2000);
    assert_eq!(config.max_fsas_per_command, 999);
    assert_eq!(config.max_fsas_per_send, 100);
    assert_eq!(config.monitoring_interval_secs, 60);
    assert!(config.export_output_dir.is_none());
    assert!(!config.help_text.is_empty());
}

#[test]
fn explicit_values_override_defaults() {
    let raw = format!(
        "{MINIMAL}
moderator_role: \"area-mods\"
command_channels: [\"bot-spam\"]
reconciliation_interval_secs: 60
max_fsas_per_send: 5
export_output_dir: \"/tmp/exports\"
"
    );
    let config: Config = serde_yaml::from_str(&raw).expect("full config parses");
    assert_eq!(config.moderator_role, "area-mods");
    assert_eq!(config.command_channels, vec!["bot-spam".to_string()]);
    assert_eq!(config.reconciliation_interval_secs, 60);
    assert_eq!(config.max_fsas_per_send, 5);
    assert_eq!(
        config.export_output_dir.as_deref(),
        Some(std::path::Path::new("/tmp/exports"))
    );
}

#[test]
fn missing_required_keys_fail() {
    assert!(serde_yaml::from_str::<Config>("discord_token: \"token\"").is_err());
}
