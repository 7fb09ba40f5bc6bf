use crate::core::MaintenanceTask;
use crate::domain::model::TaskReport;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

struct ScheduledEntry {
    every: Duration,
    task: Arc<dyn MaintenanceTask>,
}

/// In-process beat loop. Each registered task gets its own interval; the
/// first tick fires immediately on startup. A failing task run is logged and
/// never stops its own loop or the other tasks.
#[derive(Default)]
pub struct Scheduler {
    entries: Vec<ScheduledEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Arc<dyn MaintenanceTask>, every: Duration) {
        tracing::info!(
            "Scheduled task '{}' every {}s",
            task.name(),
            every.as_secs()
        );
        self.entries.push(ScheduledEntry { every, task });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every registered task once, sequentially. Errors are collected
    /// per task instead of aborting the sweep.
    pub async fn run_pending_once(&self) -> Vec<(&'static str, Result<TaskReport>)> {
        let mut results = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let name = entry.task.name();
            let result = entry.task.run().await;
            match &result {
                Ok(report) => {
                    tracing::info!("Task '{}': {} ({} affected)", name, report.message, report.affected)
                }
                Err(e) => tracing::error!("Task '{}' failed: {}", name, e),
            }
            results.push((name, result));
        }
        results
    }

    /// Runs the beat loop until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let mut handles = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            let task = Arc::clone(&entry.task);
            let every = entry.every;
            handles.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    match task.run().await {
                        Ok(report) => tracing::info!(
                            "Task '{}': {} ({} affected)",
                            task.name(),
                            report.message,
                            report.affected
                        ),
                        Err(e) => tracing::error!(
                            "Task '{}' failed: {} (suggestion: {})",
                            task.name(),
                            e,
                            e.recovery_suggestion()
                        ),
                    }
                }
            }));
        }

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown signal received, stopping scheduler");
        for handle in handles {
            handle.abort();
        }

        Ok(())
    }
}
