use crate::core::graphql::GraphqlClient;
use crate::core::{CustomerRef, LogSink, MaintenanceTask, TaskReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Duration, Local, Utc};
use serde::Deserialize;

pub const CLEANUP_LOG_FILE: &str = "customer_cleanup_log.txt";

const INACTIVE_CUSTOMERS_QUERY: &str = r#"
query InactiveCustomers($before: DateTime!) {
  customers(lastOrderBefore: $before) {
    id
    email
  }
}"#;

const DELETE_CUSTOMERS_MUTATION: &str = r#"
mutation DeleteCustomers($ids: [ID!]!) {
  deleteCustomers(ids: $ids) {
    deletedCount
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePayload {
    deleted_count: u64,
}

/// Deletes customers whose last order is strictly older than the retention
/// window and appends one summary line to the cleanup log per run.
pub struct CustomerCleanup<L: LogSink> {
    client: GraphqlClient,
    log: L,
    retention_days: i64,
}

impl<L: LogSink> CustomerCleanup<L> {
    pub fn new(client: GraphqlClient, log: L, retention_days: i64) -> Self {
        Self {
            client,
            log,
            retention_days,
        }
    }
}

#[async_trait]
impl<L: LogSink> MaintenanceTask for CustomerCleanup<L> {
    fn name(&self) -> &'static str {
        "customer-cleanup"
    }

    async fn run(&self) -> Result<TaskReport> {
        let cutoff = Utc::now() - Duration::days(self.retention_days);
        tracing::debug!("Querying customers with no order since {}", cutoff);

        let data = self
            .client
            .execute(
                INACTIVE_CUSTOMERS_QUERY,
                serde_json::json!({ "before": cutoff.to_rfc3339() }),
            )
            .await?;
        let customers: Vec<CustomerRef> = serde_json::from_value(data["customers"].clone())?;

        // No matches means nothing to delete; the mutation is skipped so a
        // repeat run right after a cleanup touches nothing.
        let deleted = if customers.is_empty() {
            0
        } else {
            let ids: Vec<&str> = customers.iter().map(|c| c.id.as_str()).collect();
            tracing::info!("Deleting {} inactive customers", ids.len());
            let data = self
                .client
                .execute(DELETE_CUSTOMERS_MUTATION, serde_json::json!({ "ids": ids }))
                .await?;
            let payload: DeletePayload = serde_json::from_value(data["deleteCustomers"].clone())?;
            payload.deleted_count as usize
        };

        let line = format!(
            "{} - Deleted {} inactive customers",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            deleted
        );
        self.log.append(CLEANUP_LOG_FILE, &line).await?;

        Ok(TaskReport {
            task: self.name().to_string(),
            affected: deleted,
            message: format!("deleted {} inactive customers", deleted),
        })
    }
}
