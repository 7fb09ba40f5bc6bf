use async_trait::async_trait;
use crm_maintenance::core::{MaintenanceTask, TaskReport};
use crm_maintenance::utils::error::{CrmError, Result};
use crm_maintenance::Scheduler;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct CountingTask {
    name: &'static str,
    runs: Arc<AtomicUsize>,
    should_fail: bool,
}

impl CountingTask {
    fn new(name: &'static str) -> (Arc<Self>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                name,
                runs: Arc::clone(&runs),
                should_fail: false,
            }),
            runs,
        )
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            runs: Arc::new(AtomicUsize::new(0)),
            should_fail: true,
        })
    }
}

#[async_trait]
impl MaintenanceTask for CountingTask {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self) -> Result<TaskReport> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(CrmError::TaskError {
                task: self.name.to_string(),
                message: "simulated failure".to_string(),
            });
        }
        Ok(TaskReport {
            task: self.name.to_string(),
            affected: 1,
            message: "ok".to_string(),
        })
    }
}

#[tokio::test]
async fn test_run_pending_once_runs_every_task_exactly_once() {
    let (first, first_runs) = CountingTask::new("first");
    let (second, second_runs) = CountingTask::new("second");

    let mut scheduler = Scheduler::new();
    scheduler.register(first, Duration::from_secs(300));
    scheduler.register(second, Duration::from_secs(600));
    assert_eq!(scheduler.len(), 2);

    let results = scheduler.run_pending_once().await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, r)| r.is_ok()));
    assert_eq!(first_runs.load(Ordering::SeqCst), 1);
    assert_eq!(second_runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_task_does_not_stop_the_sweep() {
    let failing = CountingTask::failing("broken");
    let (ok_task, ok_runs) = CountingTask::new("healthy");

    let mut scheduler = Scheduler::new();
    scheduler.register(failing, Duration::from_secs(60));
    scheduler.register(ok_task, Duration::from_secs(60));

    let results = scheduler.run_pending_once().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].1.is_err());
    assert!(results[1].1.is_ok());
    // The healthy task still ran after the failure
    assert_eq!(ok_runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_scheduler() {
    let scheduler = Scheduler::new();
    assert!(scheduler.is_empty());
    assert!(scheduler.run_pending_once().await.is_empty());
}
