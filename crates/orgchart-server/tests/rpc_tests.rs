//! Tests for JSON-RPC request processing.
//!
//! Verifies:
//! - Method dispatch and result payloads
//! - Rejection codes and machine-readable reasons
//! - The `replace` flag on `employee.update`
//! - Protocol-level failures (parse errors, unknown methods, bad params)
//! - Line-delimited exchange over a real TCP connection

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use orgchart_hierarchy::Rejection;
use orgchart_protocol::*;
use orgchart_server::config::CatalogConfig;
use orgchart_server::{OrgDirectory, RpcServer, SharedDirectory};
use orgchart_server::rpc_server::process_request;

fn shared() -> SharedDirectory {
    OrgDirectory::from_config(&CatalogConfig::default())
        .unwrap()
        .into_shared()
}

async fn call(dir: &SharedDirectory, method: &str, params: Value) -> RpcResponse {
    let request = RpcRequest::new(method, params);
    let line = serde_json::to_string(&request).unwrap();
    let response = process_request(&line, dir).await;
    assert_eq!(response.id, request.id);
    response
}

async fn ok(dir: &SharedDirectory, method: &str, params: Value) -> Value {
    let response = call(dir, method, params).await;
    assert!(!response.is_error(), "unexpected error: {:?}", response.error);
    response.result.unwrap()
}

fn error_of(response: &RpcResponse) -> &RpcError {
    response.error.as_ref().expect("expected an error response")
}

fn expected_code(rejection: &Rejection) -> i32 {
    REJECTION_CODE_BASE - rejection.ordinal() as i32
}

// ═══════════════════════════════════════════════════════════════
// Employees
// ═══════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_and_get_employee() {
    let dir = shared();
    let alice = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Alice", "jobTitle": "Director" }),
    )
    .await;
    assert_eq!(alice["name"], "Alice");
    assert_eq!(alice["job_title"], "Director");

    let bob = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Bob", "job_title": "Manager", "manager_id": alice["id"] }),
    )
    .await;
    assert_eq!(bob["manager"]["name"], "Alice");

    let fetched = ok(&dir, methods::EMPLOYEE_GET, json!({ "id": alice["id"] })).await;
    assert_eq!(fetched["subordinates"][0]["name"], "Bob");

    let all = ok(&dir, methods::EMPLOYEE_LIST, Value::Null).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn rejection_carries_code_and_reason() {
    let dir = shared();
    ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Alice", "job_title": "Director" }),
    )
    .await;

    let response = call(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Bob", "job_title": "Director" }),
    )
    .await;
    let error = error_of(&response);
    assert_eq!(error.code, expected_code(&Rejection::RootAlreadyExists));
    assert_eq!(
        error.data.as_ref().unwrap()["reason"],
        "root_already_exists"
    );
}

#[tokio::test]
async fn rejection_codes_are_distinct() {
    let mut codes: Vec<i32> = Rejection::ALL.iter().map(expected_code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), Rejection::ALL.len());
    assert!(codes.iter().all(|c| *c <= REJECTION_CODE_BASE));
}

#[tokio::test]
async fn unknown_employee_maps_to_record_not_found() {
    let dir = shared();
    let response = call(&dir, methods::EMPLOYEE_GET, json!({ "id": 99 })).await;
    assert_eq!(error_of(&response).code, RECORD_NOT_FOUND);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let dir = shared();
    let root = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Root", "job_title": "Director" }),
    )
    .await;
    let lead = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Lee", "job_title": "Lead", "manager_id": root["id"] }),
    )
    .await;

    let updated = ok(
        &dir,
        methods::EMPLOYEE_UPDATE,
        json!({ "id": lead["id"], "name": "Lena" }),
    )
    .await;
    assert_eq!(updated["id"], lead["id"]);
    assert_eq!(updated["name"], "Lena");
    assert_eq!(updated["job_title"], "Lead");
}

#[tokio::test]
async fn update_with_replace_flag_issues_new_identity() {
    let dir = shared();
    let root = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Root", "job_title": "Director" }),
    )
    .await;
    let old = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Old", "job_title": "Manager", "manager_id": root["id"] }),
    )
    .await;
    ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Dev", "job_title": "Developer", "manager_id": old["id"] }),
    )
    .await;

    let new = ok(
        &dir,
        methods::EMPLOYEE_UPDATE,
        json!({
            "id": old["id"],
            "replace": true,
            "name": "New",
            "job_title": "Lead",
            "manager_id": root["id"],
        }),
    )
    .await;
    assert_ne!(new["id"], old["id"]);
    assert_eq!(new["subordinates"][0]["name"], "Dev");

    let gone = call(&dir, methods::EMPLOYEE_GET, json!({ "id": old["id"] })).await;
    assert_eq!(error_of(&gone).code, RECORD_NOT_FOUND);
}

#[tokio::test]
async fn replace_without_required_fields_rejected() {
    let dir = shared();
    let root = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Root", "job_title": "Director" }),
    )
    .await;

    let response = call(
        &dir,
        methods::EMPLOYEE_UPDATE,
        json!({ "id": root["id"], "replace": true, "name": "Only Name" }),
    )
    .await;
    assert_eq!(
        error_of(&response).code,
        expected_code(&Rejection::MissingRequiredFields)
    );
}

#[tokio::test]
async fn delete_returns_deleted_id() {
    let dir = shared();
    let root = ok(
        &dir,
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Root", "job_title": "Director" }),
    )
    .await;

    let result = ok(&dir, methods::EMPLOYEE_DELETE, json!({ "id": root["id"] })).await;
    assert_eq!(result["deleted"], root["id"]);

    let status = ok(&dir, methods::DIRECTORY_STATUS, Value::Null).await;
    assert_eq!(status["employee_count"], 0);
}

// ═══════════════════════════════════════════════════════════════
// Designations
// ═══════════════════════════════════════════════════════════════

#[tokio::test]
async fn insert_designation_between_neighbours() {
    let dir = shared();
    let inserted = ok(
        &dir,
        methods::DESIGNATION_INSERT,
        json!({ "title": "Senior Manager", "after": "Director" }),
    )
    .await;
    assert_eq!(inserted["level"], 1.5);

    let list = ok(&dir, methods::DESIGNATION_LIST, Value::Null).await;
    assert_eq!(list[0]["title"], "Director");
    assert_eq!(list[1]["title"], "Senior Manager");
}

#[tokio::test]
async fn insert_duplicate_designation_is_invalid_params() {
    let dir = shared();
    let response = call(
        &dir,
        methods::DESIGNATION_INSERT,
        json!({ "title": "Manager", "after": "Director" }),
    )
    .await;
    assert_eq!(error_of(&response).code, INVALID_PARAMS);
}

// ═══════════════════════════════════════════════════════════════
// Protocol failures
// ═══════════════════════════════════════════════════════════════

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let dir = shared();
    let response = process_request("{not json", &dir).await;
    assert_eq!(error_of(&response).code, PARSE_ERROR);
    assert!(response.id.is_none());
}

#[tokio::test]
async fn unknown_method_not_found() {
    let dir = shared();
    let response = call(&dir, "employee.promote", json!({})).await;
    assert_eq!(error_of(&response).code, METHOD_NOT_FOUND);
}

#[tokio::test]
async fn missing_params_are_invalid() {
    let dir = shared();
    let response = call(&dir, methods::EMPLOYEE_GET, json!({})).await;
    assert_eq!(error_of(&response).code, INVALID_PARAMS);

    let response = call(&dir, methods::EMPLOYEE_CREATE, json!({ "name": "X" })).await;
    assert_eq!(error_of(&response).code, INVALID_PARAMS);
}

// ═══════════════════════════════════════════════════════════════
// TCP transport
// ═══════════════════════════════════════════════════════════════

#[tokio::test]
async fn serves_line_delimited_requests_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = RpcServer::new(addr.to_string(), shared(), 2);
    let handle = tokio::spawn(server.serve(listener));

    let stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    let request = RpcRequest::new(
        methods::EMPLOYEE_CREATE,
        json!({ "name": "Alice", "job_title": "Director" }),
    );
    let line = serde_json::to_string(&request).unwrap();
    writer.write_all(line.as_bytes()).await.unwrap();
    writer.write_all(b"\n\n").await.unwrap();

    let reply = lines.next_line().await.unwrap().unwrap();
    let response: RpcResponse = serde_json::from_str(&reply).unwrap();
    assert_eq!(response.id, request.id);
    assert_eq!(response.result.unwrap()["name"], "Alice");

    handle.abort();
}
