use crate::utils::error::{CrmError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlResponseError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponseError {
    message: String,
}

/// Thin GraphQL-over-HTTP client for the CRM endpoint. Transport errors and
/// 5xx responses are retried a bounded number of times with a fixed delay;
/// GraphQL-level errors are terminal.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl GraphqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        retry_attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retry_attempts,
            retry_delay,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes a query or mutation and returns the `data` object.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            tracing::debug!(
                "GraphQL request to {} (attempt {}/{})",
                self.endpoint,
                attempt,
                self.retry_attempts.max(1)
            );

            match self.try_execute(&body).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts.max(1) => {
                    tracing::warn!(
                        "GraphQL request failed (attempt {}): {}, retrying in {:?}",
                        attempt,
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_execute(&self, body: &Value) -> Result<Value> {
        let response = self.client.post(&self.endpoint).json(body).send().await?;
        let status = response.status();
        tracing::debug!("GraphQL response status: {}", status);

        if status.is_server_error() {
            // Surface as a retryable transport failure
            if let Err(e) = response.error_for_status_ref() {
                return Err(CrmError::ApiError(e));
            }
        }

        let parsed: GraphqlResponse = response.json().await?;

        if let Some(errors) = parsed.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(CrmError::GraphqlError { message });
            }
        }

        parsed.data.ok_or_else(|| CrmError::GraphqlError {
            message: "Response contained no data".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, attempts: u32) -> GraphqlClient {
        GraphqlClient::new(
            server.url("/graphql"),
            Duration::from_secs(5),
            attempts,
            Duration::from_millis(10),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_data_object() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(serde_json::json!({"data": {"hello": "Hello!"}}));
        });

        let client = client_for(&server, 1);
        let data = client
            .execute("query { hello }", serde_json::json!({}))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(data["hello"], "Hello!");
    }

    #[tokio::test]
    async fn test_graphql_errors_are_terminal() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": null,
                "errors": [{"message": "Cannot query field 'helo'"}]
            }));
        });

        let client = client_for(&server, 3);
        let err = client
            .execute("query { helo }", serde_json::json!({}))
            .await
            .unwrap_err();

        // No retries on schema-level errors
        mock.assert_hits(1);
        assert!(matches!(err, CrmError::GraphqlError { .. }));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(500);
        });

        let client = client_for(&server, 3);
        let err = client
            .execute("query { hello }", serde_json::json!({}))
            .await
            .unwrap_err();

        mock.assert_hits(3);
        assert!(matches!(err, CrmError::ApiError(_)));
    }
}
