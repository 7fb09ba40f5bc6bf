use crm_maintenance::app::tasks::cleanup::{CustomerCleanup, CLEANUP_LOG_FILE};
use crm_maintenance::core::MaintenanceTask;
use crm_maintenance::{GraphqlClient, LocalLogStore, TaskRunner};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn graphql_client(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new(
        server.url("/graphql"),
        Duration::from_secs(5),
        1,
        Duration::from_millis(10),
    )
    .unwrap()
}

fn log_store(dir: &TempDir) -> LocalLogStore {
    LocalLogStore::new(dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cleanup_deletes_inactive_customers_and_logs_once() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("InactiveCustomers");
        then.status(200).json_body(serde_json::json!({
            "data": {
                "customers": [
                    {"id": "17", "email": "old1@example.com"},
                    {"id": "42", "email": "old2@example.com"}
                ]
            }
        }));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("DeleteCustomers");
        then.status(200).json_body(serde_json::json!({
            "data": {"deleteCustomers": {"deletedCount": 2}}
        }));
    });

    let task = CustomerCleanup::new(graphql_client(&server), log_store(&temp_dir), 365);
    let report = TaskRunner::new(task).run().await.unwrap();

    query_mock.assert();
    delete_mock.assert();
    assert_eq!(report.affected, 2);

    let log_content =
        std::fs::read_to_string(temp_dir.path().join(CLEANUP_LOG_FILE)).unwrap();
    let lines: Vec<&str> = log_content.lines().collect();
    assert_eq!(lines.len(), 1);

    let format = regex::Regex::new(
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} - Deleted 2 inactive customers$",
    )
    .unwrap();
    assert!(format.is_match(lines[0]), "unexpected log line: {}", lines[0]);
}

#[tokio::test]
async fn test_cleanup_with_no_matches_skips_delete_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("InactiveCustomers");
        then.status(200)
            .json_body(serde_json::json!({"data": {"customers": []}}));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("DeleteCustomers");
        then.status(200).json_body(serde_json::json!({
            "data": {"deleteCustomers": {"deletedCount": 0}}
        }));
    });

    let task = CustomerCleanup::new(graphql_client(&server), log_store(&temp_dir), 365);
    let report = task.run().await.unwrap();

    query_mock.assert();
    delete_mock.assert_hits(0);
    assert_eq!(report.affected, 0);

    // The log line is still written, exactly one per invocation
    let log_content =
        std::fs::read_to_string(temp_dir.path().join(CLEANUP_LOG_FILE)).unwrap();
    assert_eq!(log_content.lines().count(), 1);
    assert!(log_content.contains("Deleted 0 inactive customers"));
}

#[tokio::test]
async fn test_second_run_after_cleanup_deletes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let mut first_query = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("InactiveCustomers");
        then.status(200).json_body(serde_json::json!({
            "data": {"customers": [{"id": "7", "email": "stale@example.com"}]}
        }));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("DeleteCustomers");
        then.status(200).json_body(serde_json::json!({
            "data": {"deleteCustomers": {"deletedCount": 1}}
        }));
    });

    let task = CustomerCleanup::new(graphql_client(&server), log_store(&temp_dir), 365);
    let first = task.run().await.unwrap();
    assert_eq!(first.affected, 1);
    delete_mock.assert_hits(1);

    // The matching customers are gone now; the query comes back empty
    first_query.delete();
    server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("InactiveCustomers");
        then.status(200)
            .json_body(serde_json::json!({"data": {"customers": []}}));
    });

    let second = task.run().await.unwrap();
    assert_eq!(second.affected, 0);
    delete_mock.assert_hits(1);

    let log_content =
        std::fs::read_to_string(temp_dir.path().join(CLEANUP_LOG_FILE)).unwrap();
    assert_eq!(log_content.lines().count(), 2);
}

#[tokio::test]
async fn test_cleanup_api_failure_writes_no_log_line() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(500);
    });

    let task = CustomerCleanup::new(graphql_client(&server), log_store(&temp_dir), 365);
    let result = TaskRunner::new(task).run().await;

    query_mock.assert();
    assert!(result.is_err());
    assert!(!temp_dir.path().join(CLEANUP_LOG_FILE).exists());
}
