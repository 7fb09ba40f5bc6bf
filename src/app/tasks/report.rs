use crate::core::graphql::GraphqlClient;
use crate::core::{CrmStatistics, LogSink, MaintenanceTask, TaskReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Local;

pub const REPORT_LOG_FILE: &str = "crm_report_log.txt";

const CRM_STATS_QUERY: &str = r#"
query CrmStatistics {
  crmStatistics {
    totalCustomers
    totalOrders
    totalRevenue
  }
}"#;

/// Fetches aggregate CRM statistics and appends one report line.
pub struct CrmReport<L: LogSink> {
    client: GraphqlClient,
    log: L,
}

impl<L: LogSink> CrmReport<L> {
    pub fn new(client: GraphqlClient, log: L) -> Self {
        Self { client, log }
    }
}

#[async_trait]
impl<L: LogSink> MaintenanceTask for CrmReport<L> {
    fn name(&self) -> &'static str {
        "crm-report"
    }

    async fn run(&self) -> Result<TaskReport> {
        let data = self
            .client
            .execute(CRM_STATS_QUERY, serde_json::json!({}))
            .await?;
        let stats: CrmStatistics = serde_json::from_value(data["crmStatistics"].clone())?;

        let line = format!(
            "{} - Report: {} customers, {} orders, {:.2} revenue.",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            stats.total_customers,
            stats.total_orders,
            stats.total_revenue
        );
        self.log.append(REPORT_LOG_FILE, &line).await?;

        Ok(TaskReport {
            task: self.name().to_string(),
            affected: 1,
            message: format!(
                "report written ({} customers, {} orders)",
                stats.total_customers, stats.total_orders
            ),
        })
    }
}
