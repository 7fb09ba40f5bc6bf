use crate::domain::model::{ScheduleSettings, TaskReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only sink for task log files. One call appends one `\n`-terminated
/// line to the named file; files are never truncated.
pub trait LogSink: Send + Sync {
    fn append(
        &self,
        file: &str,
        line: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn graphql_endpoint(&self) -> &str;
    fn log_directory(&self) -> &str;
    fn retention_days(&self) -> i64;
    fn reminder_window_days(&self) -> i64;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn schedule(&self) -> ScheduleSettings;
}

/// A single maintenance operation against the CRM. Object safe so the
/// scheduler can drive a heterogeneous set of tasks.
#[async_trait]
pub trait MaintenanceTask: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self) -> Result<TaskReport>;
}
