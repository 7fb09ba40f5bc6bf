use crate::core::graphql::GraphqlClient;
use crate::core::{LogSink, MaintenanceTask, RestockedProduct, TaskReport};
use crate::utils::error::{CrmError, Result};
use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;

pub const LOW_STOCK_LOG_FILE: &str = "low_stock_updates_log.txt";

const UPDATE_LOW_STOCK_MUTATION: &str = r#"
mutation UpdateLowStockProducts {
  updateLowStockProducts {
    success
    message
    updatedProducts {
      name
      stock
    }
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LowStockPayload {
    success: bool,
    message: Option<String>,
    #[serde(default)]
    updated_products: Vec<RestockedProduct>,
}

/// Triggers the CRM's restock mutation and logs one line per updated product.
pub struct LowStockUpdate<L: LogSink> {
    client: GraphqlClient,
    log: L,
}

impl<L: LogSink> LowStockUpdate<L> {
    pub fn new(client: GraphqlClient, log: L) -> Self {
        Self { client, log }
    }
}

#[async_trait]
impl<L: LogSink> MaintenanceTask for LowStockUpdate<L> {
    fn name(&self) -> &'static str {
        "low-stock-update"
    }

    async fn run(&self) -> Result<TaskReport> {
        let data = self
            .client
            .execute(UPDATE_LOW_STOCK_MUTATION, serde_json::json!({}))
            .await?;
        let payload: LowStockPayload =
            serde_json::from_value(data["updateLowStockProducts"].clone())?;

        if !payload.success {
            return Err(CrmError::TaskError {
                task: self.name().to_string(),
                message: payload
                    .message
                    .unwrap_or_else(|| "restock mutation reported failure".to_string()),
            });
        }

        for product in &payload.updated_products {
            let line = format!(
                "{} - Product '{}' updated to {} in stock",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                product.name,
                product.stock
            );
            self.log.append(LOW_STOCK_LOG_FILE, &line).await?;
        }

        Ok(TaskReport {
            task: self.name().to_string(),
            affected: payload.updated_products.len(),
            message: format!("restocked {} products", payload.updated_products.len()),
        })
    }
}
