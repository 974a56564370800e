use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Onboarding progress file (path info only, no existence check)
    pub progress_file: PathBuf,

    /// Directory for the rolling log file; empty means stdout only
    pub log_dir: PathBuf,

    /// Simulated OS state used by the headless runner
    pub simulation: SimulationConfig,
}

/// Simulated platform facts. Raw strings, exactly as written in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationConfig {
    pub bluetooth_authorization: String,
    pub notification_authorization: String,
    pub radio_state: String,
    /// Whether permission prompts are answered with "allow"
    pub grant_on_request: bool,
    /// Artificial latency added to every notification status query
    pub resolve_delay_ms: u64,
    /// Postcode typed into the postcode screen
    pub postcode: String,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> &'a str {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let simulation = SimulationConfig {
            bluetooth_authorization: str_at(toml_value, "simulation", "bluetooth_authorization")
                .to_string(),
            notification_authorization: str_at(
                toml_value,
                "simulation",
                "notification_authorization",
            )
            .to_string(),
            radio_state: str_at(toml_value, "simulation", "radio_state").to_string(),
            grant_on_request: toml_value
                .get("simulation")
                .and_then(|s| s.get("grant_on_request"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            resolve_delay_ms: toml_value
                .get("simulation")
                .and_then(|s| s.get("resolve_delay_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            postcode: str_at(toml_value, "simulation", "postcode").to_string(),
        };

        Ok(Self {
            progress_file: PathBuf::from(str_at(toml_value, "storage", "progress_file")),
            log_dir: PathBuf::from(str_at(toml_value, "logging", "log_dir")),
            simulation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_section() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            progress_file = "/tmp/progress.json"

            [logging]
            log_dir = "/tmp/logs"

            [simulation]
            bluetooth_authorization = "allowed"
            notification_authorization = "denied"
            radio_state = "off"
            grant_on_request = true
            resolve_delay_ms = 250
            postcode = "SW1A"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.progress_file, PathBuf::from("/tmp/progress.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.simulation.bluetooth_authorization, "allowed");
        assert_eq!(config.simulation.notification_authorization, "denied");
        assert_eq!(config.simulation.radio_state, "off");
        assert!(config.simulation.grant_on_request);
        assert_eq!(config.simulation.resolve_delay_ms, 250);
        assert_eq!(config.simulation.postcode, "SW1A");
    }

    #[test]
    fn missing_values_are_empty_facts() {
        let value: toml::Value = toml::from_str("[simulation]\n").unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn negative_delay_is_clamped_not_rejected() {
        let value: toml::Value = toml::from_str("[simulation]\nresolve_delay_ms = -5\n").unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.simulation.resolve_delay_ms, 0);
    }
}
