//! Configuration types for sparkmon.
//!
//! Settings come from `/etc/sparkmon/config.toml`, then the user config
//! (honoring `XDG_CONFIG_HOME`), then `SPARKMON_*` environment variables,
//! and finally CLI flags override everything.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub shim: ShimConfig,

    pub refresh: RefreshConfig,

    pub display: DisplayConfig,

    pub behavior: BehaviorConfig,
}

/// Connection settings for the local history shim.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Port the shim listens on (http://localhost:{port}/).
    /// Required via config, environment, or --port.
    pub port: Option<u16>,

    /// Cluster name forwarded on eclipse-sourced sessions
    pub cluster_name: Option<String>,

    /// Hosting environment: "intellij" or "eclipse"
    pub source_type: String,

    /// Engine behind the shim (informational)
    pub engine_type: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            port: None,
            cluster_name: None,
            source_type: "intellij".to_string(),
            engine_type: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Applications list refresh interval in seconds
    pub applications_interval: u64,

    /// Enable idle slowdown
    pub idle_slowdown: bool,

    /// Seconds before considered idle
    pub idle_threshold: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            applications_interval: 10,
            idle_slowdown: true,
            idle_threshold: 30,
        }
    }
}

/// Minimum allowed refresh interval in seconds (prevents tight polling loops)
const MIN_REFRESH_INTERVAL: u64 = 1;

impl RefreshConfig {
    /// Validate refresh configuration values.
    /// Returns a list of warnings for invalid values that were corrected to
    /// defaults. If `strict` is true, returns Err instead of correcting.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        if self.applications_interval < MIN_REFRESH_INTERVAL {
            let msg = format!(
                "refresh.applications_interval must be at least {MIN_REFRESH_INTERVAL} second(s), got {}",
                self.applications_interval
            );
            if strict {
                return Err(msg);
            }
            warnings.push(format!(
                "{msg} - using default ({})",
                defaults.applications_interval
            ));
            self.applications_interval = defaults.applications_interval;
        }

        if self.idle_slowdown && self.idle_threshold < MIN_REFRESH_INTERVAL {
            let msg = format!(
                "refresh.idle_threshold must be at least {MIN_REFRESH_INTERVAL} second(s), got {}",
                self.idle_threshold
            );
            if strict {
                return Err(msg);
            }
            warnings.push(format!("{msg} - using default ({})", defaults.idle_threshold));
            self.idle_threshold = defaults.idle_threshold;
        }

        Ok(warnings)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,

    /// Maximum length for application names before truncation
    pub app_name_max_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            app_name_max_length: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Enable clipboard support for yanking application ids
    pub copy_to_clipboard: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            copy_to_clipboard: true,
        }
    }
}

impl MonitorConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME.
    #[must_use]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(std::path::PathBuf::from(xdg_config).join("sparkmon/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(std::path::PathBuf::from(home).join(".config/sparkmon/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("sparkmon/config.toml"))
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(&mut config, "/etc/sparkmon/config.toml", &mut warnings);

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut config, &user_path.to_string_lossy(), &mut warnings);
        }

        Self::apply_env_overrides(&mut config, &mut warnings);

        match config.refresh.validate(strict) {
            Ok(mut refresh_warnings) => warnings.append(&mut refresh_warnings),
            Err(e) => {
                warnings.push(format!("Invalid refresh config: {e}"));
                config.refresh = RefreshConfig::default();
            }
        }

        (config, warnings)
    }

    fn is_strict_mode() -> bool {
        std::env::var("SPARKMON_CONFIG_STRICT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    fn load_config_file(config: &mut Self, path: &str, warnings: &mut Vec<String>) {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return; // missing file is fine
        };

        match toml::from_str::<MonitorConfig>(&contents) {
            Ok(loaded) => config.merge(loaded),
            Err(e) => warnings.push(format!("Failed to parse {path}: {e}")),
        }
    }

    /// Fold a later config file into this one. Optional shim fields only
    /// override when the later file sets them; whole sections follow the
    /// later file.
    fn merge(&mut self, other: MonitorConfig) {
        self.shim.port = other.shim.port.or(self.shim.port.take());
        self.shim.cluster_name = other.shim.cluster_name.or(self.shim.cluster_name.take());
        self.shim.engine_type = other.shim.engine_type.or(self.shim.engine_type.take());
        self.shim.source_type = other.shim.source_type;
        self.shim.timeout_secs = other.shim.timeout_secs;
        self.refresh = other.refresh;
        self.display = other.display;
        self.behavior = other.behavior;
    }

    fn apply_env_overrides(config: &mut Self, warnings: &mut Vec<String>) {
        if let Ok(port) = std::env::var("SPARKMON_PORT") {
            match port.parse() {
                Ok(p) => config.shim.port = Some(p),
                Err(_) => warnings.push(format!("SPARKMON_PORT is not a valid port: '{port}'")),
            }
        }

        if let Ok(theme) = std::env::var("SPARKMON_THEME")
            && !theme.is_empty()
        {
            config.display.theme = theme;
        }

        if let Ok(cluster) = std::env::var("SPARKMON_CLUSTER")
            && !cluster.is_empty()
        {
            config.shim.cluster_name = Some(cluster);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.refresh.applications_interval, 10);
        assert_eq!(config.shim.source_type, "intellij");
        assert!(config.shim.port.is_none());
        assert_eq!(config.display.theme, "dark");
    }

    #[test]
    fn test_validate_corrects_zero_interval() {
        let mut refresh = RefreshConfig {
            applications_interval: 0,
            ..Default::default()
        };
        let warnings = refresh.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(refresh.applications_interval, 10);
    }

    #[test]
    fn test_validate_strict_rejects_zero_interval() {
        let mut refresh = RefreshConfig {
            applications_interval: 0,
            ..Default::default()
        };
        assert!(refresh.validate(true).is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [shim]
            port = 8998

            [display]
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.shim.port, Some(8998));
        assert_eq!(config.display.theme, "light");
        // unspecified sections keep defaults
        assert_eq!(config.refresh.applications_interval, 10);
    }

    #[test]
    fn test_user_file_merges_over_system_file() {
        let mut config: MonitorConfig = toml::from_str(
            r#"
            [shim]
            port = 8998
            cluster_name = "site-cluster"
            "#,
        )
        .unwrap();

        let user: MonitorConfig = toml::from_str(
            r#"
            [display]
            theme = "light"
            "#,
        )
        .unwrap();
        config.merge(user);

        // shim settings from the earlier file survive a file that omits them
        assert_eq!(config.shim.port, Some(8998));
        assert_eq!(config.shim.cluster_name.as_deref(), Some("site-cluster"));
        assert_eq!(config.display.theme, "light");
    }
}
