pub mod log_store;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::ScheduleSettings;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "crm-maintenance")]
#[command(about = "Maintenance task runner for the CRM GraphQL API")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Optional TOML configuration file; CLI flags below are used otherwise
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, default_value = "http://localhost:8000/graphql")]
    pub endpoint: String,

    /// Directory the task log files are appended under
    #[arg(long, global = true, default_value = "/tmp")]
    pub log_dir: String,

    /// Customers with no order in this many days are deleted by cleanup
    #[arg(long, global = true, default_value = "365")]
    pub retention_days: i64,

    /// Orders placed within this many days get a reminder
    #[arg(long, global = true, default_value = "7")]
    pub window_days: i64,

    #[arg(long, global = true, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, global = true, default_value = "3")]
    pub retry_attempts: u32,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log process CPU/memory stats")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a single maintenance task once
    Run {
        #[arg(value_enum)]
        task: TaskName,
    },
    /// Run all enabled tasks on their schedule until interrupted
    Schedule,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskName {
    Cleanup,
    Heartbeat,
    LowStock,
    OrderReminders,
    Report,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn graphql_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn log_directory(&self) -> &str {
        &self.log_dir
    }

    fn retention_days(&self) -> i64 {
        self.retention_days
    }

    fn reminder_window_days(&self) -> i64 {
        self.window_days
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        2
    }

    fn schedule(&self) -> ScheduleSettings {
        ScheduleSettings::default()
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        crate::utils::validation::validate_url("endpoint", &self.endpoint)?;
        crate::utils::validation::validate_path("log-dir", &self.log_dir)?;
        crate::utils::validation::validate_positive_number(
            "retention-days",
            self.retention_days.max(0) as u64,
            1,
        )?;
        crate::utils::validation::validate_positive_number(
            "window-days",
            self.window_days.max(0) as u64,
            1,
        )?;
        Ok(())
    }
}
