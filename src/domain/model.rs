use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Customer row returned by the inactive-customer query. Only the fields the
/// cleanup task needs; the full entity stays on the CRM side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    pub id: String,
    pub order_date: DateTime<Utc>,
    pub customer: CustomerContact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockedProduct {
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmStatistics {
    pub total_customers: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
}

/// Outcome of one task invocation. `affected` counts whatever the task acts
/// on: customers deleted, reminders written, products restocked.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: String,
    pub affected: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct JobSchedule {
    pub enabled: bool,
    pub every: Duration,
}

impl JobSchedule {
    pub fn new(enabled: bool, every_seconds: u64) -> Self {
        Self {
            enabled,
            every: Duration::from_secs(every_seconds),
        }
    }
}

/// One schedule entry per maintenance task. Defaults mirror the original
/// cron/beat setup: heartbeat every 5 minutes, low stock twice a day,
/// reminders daily, cleanup and report weekly.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleSettings {
    pub cleanup: JobSchedule,
    pub heartbeat: JobSchedule,
    pub low_stock: JobSchedule,
    pub order_reminders: JobSchedule,
    pub report: JobSchedule,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            cleanup: JobSchedule::new(true, 7 * 24 * 3600),
            heartbeat: JobSchedule::new(true, 300),
            low_stock: JobSchedule::new(true, 12 * 3600),
            order_reminders: JobSchedule::new(true, 24 * 3600),
            report: JobSchedule::new(true, 7 * 24 * 3600),
        }
    }
}
