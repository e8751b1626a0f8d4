//! JSON-RPC 2.0 server over TCP implementing the directory API.
//!
//! Provides the following methods:
//! - `employee.list` - All employees with their relationships
//! - `employee.get` - One employee by id
//! - `employee.create` - Hire a new employee
//! - `employee.update` - Partial update, or identity replacement with `replace: true`
//! - `employee.delete` - Remove an employee, re-parenting its subordinates
//! - `designation.list` - The designation catalog, highest rank first
//! - `designation.insert` - Add a designation ranked below an existing one
//! - `directory.status` - Counters, root employee and uptime
//!
//! The server listens on TCP and speaks newline-delimited JSON-RPC 2.0.
//! Each line received is a request; each line sent is a response.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use orgchart_hierarchy::HierarchyError;
use orgchart_protocol::*;

use crate::directory::SharedDirectory;

/// The JSON-RPC 2.0 server.
pub struct RpcServer {
    /// TCP listener address.
    bind_addr: String,
    /// Shared directory state.
    directory: SharedDirectory,
    /// Maximum concurrent connections.
    max_connections: usize,
}

impl RpcServer {
    /// Create a new RPC server.
    pub fn new(bind_addr: String, directory: SharedDirectory, max_connections: usize) -> Self {
        Self {
            bind_addr,
            directory,
            max_connections,
        }
    }

    /// Start the RPC server, listening for connections.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "JSON-RPC server listening");
        self.serve(listener).await
    }

    /// Accept connections on an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), anyhow::Error> {
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.max_connections));

        loop {
            let (stream, peer_addr) = listener.accept().await?;
            tracing::debug!(peer = %peer_addr, "RPC client connected");

            let directory = Arc::clone(&self.directory);
            let permit = semaphore.clone().acquire_owned().await?;

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, directory).await {
                    tracing::warn!(
                        peer = %peer_addr,
                        error = %e,
                        "RPC connection error"
                    );
                }
                drop(permit);
            });
        }
    }
}

/// Handle a single RPC client connection.
///
/// Reads newline-delimited JSON-RPC requests and sends back responses.
async fn handle_connection(
    stream: tokio::net::TcpStream,
    directory: SharedDirectory,
) -> Result<(), anyhow::Error> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = process_request(&line, &directory).await;
        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Process a single JSON-RPC request and return a response.
pub async fn process_request(request_str: &str, directory: &SharedDirectory) -> RpcResponse {
    let request: RpcRequest = match serde_json::from_str(request_str) {
        Ok(r) => r,
        Err(e) => {
            return RpcResponse::error(None, PARSE_ERROR, format!("Invalid JSON: {}", e));
        }
    };

    let id = request.id.clone();
    tracing::debug!(method = %request.method, id = ?id, "RPC request");

    match request.method.as_str() {
        methods::EMPLOYEE_LIST => handle_list_employees(id, directory).await,
        methods::EMPLOYEE_GET => handle_get_employee(id, &request.params, directory).await,
        methods::EMPLOYEE_CREATE => handle_create_employee(id, &request.params, directory).await,
        methods::EMPLOYEE_UPDATE => handle_update_employee(id, &request.params, directory).await,
        methods::EMPLOYEE_DELETE => handle_delete_employee(id, &request.params, directory).await,
        methods::DESIGNATION_LIST => handle_list_designations(id, directory).await,
        methods::DESIGNATION_INSERT => {
            handle_insert_designation(id, &request.params, directory).await
        }
        methods::DIRECTORY_STATUS => handle_status(id, directory).await,
        _ => RpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            ProtocolError::UnknownMethod(request.method).to_string(),
        ),
    }
}

/// Handle `employee.list`.
async fn handle_list_employees(id: Option<String>, directory: &SharedDirectory) -> RpcResponse {
    let directory = directory.read().await;
    respond(id, directory.list_employees())
}

/// Handle `employee.get`.
async fn handle_get_employee(
    id: Option<String>,
    params: &serde_json::Value,
    directory: &SharedDirectory,
) -> RpcResponse {
    let params: EmployeeIdParams = match decode(params) {
        Ok(p) => p,
        Err(e) => return invalid_params(id, e),
    };
    let directory = directory.read().await;
    respond(id, directory.get_employee(params.id))
}

/// Handle `employee.create`.
async fn handle_create_employee(
    id: Option<String>,
    params: &serde_json::Value,
    directory: &SharedDirectory,
) -> RpcResponse {
    let input: CreateEmployee = match decode(params) {
        Ok(p) => p,
        Err(e) => return invalid_params(id, e),
    };
    let mut directory = directory.write().await;
    respond(id, directory.create_employee(&input))
}

/// Handle `employee.update`, routing to replace when `replace` is set.
async fn handle_update_employee(
    id: Option<String>,
    params: &serde_json::Value,
    directory: &SharedDirectory,
) -> RpcResponse {
    let params: UpdateEmployeeParams = match decode(params) {
        Ok(p) => p,
        Err(e) => return invalid_params(id, e),
    };
    let mut directory = directory.write().await;
    if params.replace {
        let input = ReplaceEmployee::from(params.changes);
        respond(id, directory.replace_employee(params.id, &input))
    } else {
        respond(id, directory.update_employee(params.id, &params.changes))
    }
}

/// Handle `employee.delete`.
async fn handle_delete_employee(
    id: Option<String>,
    params: &serde_json::Value,
    directory: &SharedDirectory,
) -> RpcResponse {
    let params: EmployeeIdParams = match decode(params) {
        Ok(p) => p,
        Err(e) => return invalid_params(id, e),
    };
    let mut directory = directory.write().await;
    let result = directory
        .delete_employee(params.id)
        .map(|()| serde_json::json!({ "deleted": params.id }));
    respond(id, result)
}

/// Handle `designation.list`.
async fn handle_list_designations(id: Option<String>, directory: &SharedDirectory) -> RpcResponse {
    let directory = directory.read().await;
    respond(id, directory.list_designations())
}

/// Handle `designation.insert`.
async fn handle_insert_designation(
    id: Option<String>,
    params: &serde_json::Value,
    directory: &SharedDirectory,
) -> RpcResponse {
    let params: InsertDesignationParams = match decode(params) {
        Ok(p) => p,
        Err(e) => return invalid_params(id, e),
    };
    let mut directory = directory.write().await;
    respond(id, directory.insert_designation(&params.title, &params.after))
}

/// Handle `directory.status`.
async fn handle_status(id: Option<String>, directory: &SharedDirectory) -> RpcResponse {
    let directory = directory.read().await;
    respond(id, directory.status())
}

// ── Helpers ──

fn decode<T: DeserializeOwned>(params: &serde_json::Value) -> Result<T, ProtocolError> {
    Ok(serde_json::from_value(params.clone())?)
}

fn invalid_params(id: Option<String>, error: ProtocolError) -> RpcResponse {
    RpcResponse::error(id, INVALID_PARAMS, error.to_string())
}

/// Serialize a successful result or map the error to its response code.
fn respond<T: serde::Serialize>(
    id: Option<String>,
    result: Result<T, HierarchyError>,
) -> RpcResponse {
    match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(json) => RpcResponse::success(id, json),
            Err(e) => RpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
        },
        Err(error) => error_response(id, error),
    }
}

/// Map a hierarchy error to a JSON-RPC error.
///
/// Every rejection gets its own code below `REJECTION_CODE_BASE`.
pub fn error_response(id: Option<String>, error: HierarchyError) -> RpcResponse {
    match error {
        HierarchyError::Rejected(rejection) => RpcResponse::rejection(
            id,
            REJECTION_CODE_BASE - rejection.ordinal() as i32,
            rejection.to_string(),
            rejection.code(),
        ),
        HierarchyError::EmployeeNotFound(_) => {
            RpcResponse::error(id, RECORD_NOT_FOUND, error.to_string())
        }
        HierarchyError::InvalidDesignation(_) => {
            RpcResponse::error(id, INVALID_PARAMS, error.to_string())
        }
        HierarchyError::Store(_) | HierarchyError::DanglingDesignation { .. } => {
            tracing::error!(error = %error, "Directory operation failed");
            RpcResponse::error(id, INTERNAL_ERROR, error.to_string())
        }
    }
}
