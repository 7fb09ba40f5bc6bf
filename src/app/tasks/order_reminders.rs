use crate::core::graphql::GraphqlClient;
use crate::core::{LogSink, MaintenanceTask, PendingOrder, TaskReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Duration, Local, Utc};

pub const REMINDERS_LOG_FILE: &str = "order_reminders_log.txt";

const RECENT_ORDERS_QUERY: &str = r#"
query RecentOrders($since: DateTime!) {
  orders(orderDateAfter: $since) {
    id
    orderDate
    customer {
      email
    }
  }
}"#;

/// Logs a reminder line for every order placed within the reminder window.
pub struct OrderReminders<L: LogSink> {
    client: GraphqlClient,
    log: L,
    window_days: i64,
}

impl<L: LogSink> OrderReminders<L> {
    pub fn new(client: GraphqlClient, log: L, window_days: i64) -> Self {
        Self {
            client,
            log,
            window_days,
        }
    }
}

#[async_trait]
impl<L: LogSink> MaintenanceTask for OrderReminders<L> {
    fn name(&self) -> &'static str {
        "order-reminders"
    }

    async fn run(&self) -> Result<TaskReport> {
        let since = Utc::now() - Duration::days(self.window_days);
        tracing::debug!("Querying orders placed after {}", since);

        let data = self
            .client
            .execute(
                RECENT_ORDERS_QUERY,
                serde_json::json!({ "since": since.to_rfc3339() }),
            )
            .await?;
        let orders: Vec<PendingOrder> = serde_json::from_value(data["orders"].clone())?;

        // One shared timestamp for the whole batch
        let timestamp = Local::now().to_rfc3339();
        for order in &orders {
            let line = format!(
                "{} - Reminder: Order ID {} for customer {} is pending.",
                timestamp, order.id, order.customer.email
            );
            self.log.append(REMINDERS_LOG_FILE, &line).await?;
        }

        Ok(TaskReport {
            task: self.name().to_string(),
            affected: orders.len(),
            message: format!("logged {} order reminders", orders.len()),
        })
    }
}
