use crate::core::MaintenanceTask;
use crate::domain::model::TaskReport;
use crate::utils::error::Result;
use crate::utils::monitor::TaskMonitor;

pub struct TaskRunner<T: MaintenanceTask> {
    task: T,
    monitor: TaskMonitor,
}

impl<T: MaintenanceTask> TaskRunner<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            monitor: TaskMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(task: T, monitoring_enabled: bool) -> Self {
        Self {
            task,
            monitor: TaskMonitor::new(monitoring_enabled),
        }
    }

    pub async fn run(&self) -> Result<TaskReport> {
        let name = self.task.name();
        tracing::info!("Starting maintenance task '{}'", name);
        self.monitor.log_phase("start");

        let report = self.task.run().await?;

        self.monitor.log_phase("done");
        tracing::info!(
            "Task '{}' finished: {} ({} affected)",
            name,
            report.message,
            report.affected
        );

        Ok(report)
    }
}
