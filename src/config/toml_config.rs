use crate::core::ConfigProvider;
use crate::domain::model::{JobSchedule, ScheduleSettings};
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub crm: CrmApiConfig,
    pub logs: Option<LogsConfig>,
    pub cleanup: Option<CleanupConfig>,
    pub heartbeat: Option<JobConfig>,
    pub low_stock: Option<JobConfig>,
    pub order_reminders: Option<RemindersConfig>,
    pub report: Option<JobConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmApiConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    pub retention_days: Option<i64>,
    pub enabled: Option<bool>,
    pub every_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub enabled: Option<bool>,
    pub every_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    pub window_days: Option<i64>,
    pub enabled: Option<bool>,
    pub every_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CrmError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CrmError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment variable values.
    /// Unset variables are left as-is so validation can flag them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CrmError::ConfigError {
            message: format!("env placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("crm.endpoint", &self.crm.endpoint)?;
        crate::utils::validation::validate_path("logs.directory", self.log_directory())?;

        if let Some(retention) = self.cleanup.as_ref().and_then(|c| c.retention_days) {
            crate::utils::validation::validate_positive_number(
                "cleanup.retention_days",
                retention.max(0) as u64,
                1,
            )?;
        }

        if let Some(window) = self.order_reminders.as_ref().and_then(|r| r.window_days) {
            crate::utils::validation::validate_positive_number(
                "order_reminders.window_days",
                window.max(0) as u64,
                1,
            )?;
        }

        if let Some(attempts) = self.crm.retry_attempts {
            crate::utils::validation::validate_range("crm.retry_attempts", attempts, 1, 10)?;
        }

        // A zero interval would spin the beat loop
        let intervals = [
            ("cleanup.every_seconds", self.cleanup.as_ref().and_then(|c| c.every_seconds)),
            ("heartbeat.every_seconds", self.heartbeat.as_ref().and_then(|c| c.every_seconds)),
            ("low_stock.every_seconds", self.low_stock.as_ref().and_then(|c| c.every_seconds)),
            (
                "order_reminders.every_seconds",
                self.order_reminders.as_ref().and_then(|c| c.every_seconds),
            ),
            ("report.every_seconds", self.report.as_ref().and_then(|c| c.every_seconds)),
        ];
        for (field, every) in intervals {
            if let Some(every) = every {
                crate::utils::validation::validate_positive_number(field, every, 1)?;
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn graphql_endpoint(&self) -> &str {
        &self.crm.endpoint
    }

    fn log_directory(&self) -> &str {
        self.logs.as_ref().map(|l| l.directory.as_str()).unwrap_or("/tmp")
    }

    fn retention_days(&self) -> i64 {
        self.cleanup
            .as_ref()
            .and_then(|c| c.retention_days)
            .unwrap_or(365)
    }

    fn reminder_window_days(&self) -> i64 {
        self.order_reminders
            .as_ref()
            .and_then(|r| r.window_days)
            .unwrap_or(7)
    }

    fn timeout_seconds(&self) -> u64 {
        self.crm.timeout_seconds.unwrap_or(30)
    }

    fn retry_attempts(&self) -> u32 {
        self.crm.retry_attempts.unwrap_or(3)
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.crm.retry_delay_seconds.unwrap_or(2)
    }

    fn schedule(&self) -> ScheduleSettings {
        let defaults = ScheduleSettings::default();

        let job = |cfg: Option<(Option<bool>, Option<u64>)>, default: JobSchedule| match cfg {
            Some((enabled, every)) => JobSchedule::new(
                enabled.unwrap_or(default.enabled),
                every.unwrap_or(default.every.as_secs()),
            ),
            None => default,
        };

        ScheduleSettings {
            cleanup: job(
                self.cleanup.as_ref().map(|c| (c.enabled, c.every_seconds)),
                defaults.cleanup,
            ),
            heartbeat: job(
                self.heartbeat.as_ref().map(|c| (c.enabled, c.every_seconds)),
                defaults.heartbeat,
            ),
            low_stock: job(
                self.low_stock.as_ref().map(|c| (c.enabled, c.every_seconds)),
                defaults.low_stock,
            ),
            order_reminders: job(
                self.order_reminders
                    .as_ref()
                    .map(|c| (c.enabled, c.every_seconds)),
                defaults.order_reminders,
            ),
            report: job(
                self.report.as_ref().map(|c| (c.enabled, c.every_seconds)),
                defaults.report,
            ),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[crm]
endpoint = "http://localhost:8000/graphql"
retry_attempts = 3

[logs]
directory = "/tmp"

[cleanup]
retention_days = 365
every_seconds = 604800

[heartbeat]
every_seconds = 300
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.graphql_endpoint(), "http://localhost:8000/graphql");
        assert_eq!(config.retention_days(), 365);
        assert_eq!(config.schedule().heartbeat.every.as_secs(), 300);
        // Unspecified sections fall back to defaults
        assert_eq!(config.reminder_window_days(), 7);
        assert!(config.schedule().report.enabled);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CRM_ENDPOINT", "https://crm.test.com/graphql");

        let toml_content = r#"
[crm]
endpoint = "${TEST_CRM_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.crm.endpoint, "https://crm.test.com/graphql");

        std::env::remove_var("TEST_CRM_ENDPOINT");
    }

    #[test]
    fn test_config_validation_rejects_bad_endpoint() {
        let toml_content = r#"
[crm]
endpoint = "not-a-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_task_in_schedule() {
        let toml_content = r#"
[crm]
endpoint = "http://localhost:8000/graphql"

[low_stock]
enabled = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.schedule().low_stock.enabled);
        assert!(config.schedule().heartbeat.enabled);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[crm]
endpoint = "https://crm.example.com/graphql"

[logs]
directory = "/var/log/crm"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_directory(), "/var/log/crm");
    }
}
