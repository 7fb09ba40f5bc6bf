pub mod cleanup;
pub mod heartbeat;
pub mod low_stock;
pub mod order_reminders;
pub mod report;

pub use cleanup::CustomerCleanup;
pub use heartbeat::Heartbeat;
pub use low_stock::LowStockUpdate;
pub use order_reminders::OrderReminders;
pub use report::CrmReport;

use crate::core::graphql::GraphqlClient;
use crate::core::scheduler::Scheduler;
use crate::core::{ConfigProvider, LogSink};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub fn graphql_client<C: ConfigProvider>(config: &C) -> Result<GraphqlClient> {
    GraphqlClient::new(
        config.graphql_endpoint(),
        Duration::from_secs(config.timeout_seconds()),
        config.retry_attempts(),
        Duration::from_secs(config.retry_delay_seconds()),
    )
}

/// Wires every enabled task into a scheduler using the configured intervals.
pub fn build_scheduler<C, L>(config: &C, log: L) -> Result<Scheduler>
where
    C: ConfigProvider,
    L: LogSink + Clone + 'static,
{
    let client = graphql_client(config)?;
    let schedule = config.schedule();
    let mut scheduler = Scheduler::new();

    if schedule.cleanup.enabled {
        scheduler.register(
            Arc::new(CustomerCleanup::new(
                client.clone(),
                log.clone(),
                config.retention_days(),
            )),
            schedule.cleanup.every,
        );
    }
    if schedule.heartbeat.enabled {
        scheduler.register(
            Arc::new(Heartbeat::new(client.clone(), log.clone())),
            schedule.heartbeat.every,
        );
    }
    if schedule.low_stock.enabled {
        scheduler.register(
            Arc::new(LowStockUpdate::new(client.clone(), log.clone())),
            schedule.low_stock.every,
        );
    }
    if schedule.order_reminders.enabled {
        scheduler.register(
            Arc::new(OrderReminders::new(
                client.clone(),
                log.clone(),
                config.reminder_window_days(),
            )),
            schedule.order_reminders.every,
        );
    }
    if schedule.report.enabled {
        scheduler.register(
            Arc::new(CrmReport::new(client, log)),
            schedule.report.every,
        );
    }

    Ok(scheduler)
}
