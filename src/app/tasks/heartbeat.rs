use crate::core::graphql::GraphqlClient;
use crate::core::{LogSink, MaintenanceTask, TaskReport};
use crate::utils::error::{CrmError, Result};
use async_trait::async_trait;
use chrono::Local;

pub const HEARTBEAT_LOG_FILE: &str = "crm_heartbeat_log.txt";

const HELLO_QUERY: &str = "query { hello }";

/// Probes the CRM endpoint and records that it is alive. Nothing is logged
/// when the probe fails; a gap in the heartbeat file is the signal.
pub struct Heartbeat<L: LogSink> {
    client: GraphqlClient,
    log: L,
}

impl<L: LogSink> Heartbeat<L> {
    pub fn new(client: GraphqlClient, log: L) -> Self {
        Self { client, log }
    }
}

#[async_trait]
impl<L: LogSink> MaintenanceTask for Heartbeat<L> {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    async fn run(&self) -> Result<TaskReport> {
        let data = self
            .client
            .execute(HELLO_QUERY, serde_json::json!({}))
            .await?;

        if data.get("hello").and_then(|v| v.as_str()).is_none() {
            return Err(CrmError::GraphqlError {
                message: "Endpoint did not return the expected 'hello' field".to_string(),
            });
        }

        let line = format!("{} CRM is alive", Local::now().format("%d/%m/%Y-%H:%M:%S"));
        self.log.append(HEARTBEAT_LOG_FILE, &line).await?;

        Ok(TaskReport {
            task: self.name().to_string(),
            affected: 1,
            message: "CRM endpoint responded".to_string(),
        })
    }
}
