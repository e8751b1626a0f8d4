use serde::{Deserialize, Serialize};

use crate::constants::JSONRPC_VERSION;
use crate::identity::EmployeeId;
use crate::types::UpdateEmployee;

/// Method names understood by the directory server.
pub mod methods {
    pub const EMPLOYEE_LIST: &str = "employee.list";
    pub const EMPLOYEE_GET: &str = "employee.get";
    pub const EMPLOYEE_CREATE: &str = "employee.create";
    pub const EMPLOYEE_UPDATE: &str = "employee.update";
    pub const EMPLOYEE_DELETE: &str = "employee.delete";
    pub const DESIGNATION_LIST: &str = "designation.list";
    pub const DESIGNATION_INSERT: &str = "designation.insert";
    pub const DIRECTORY_STATUS: &str = "directory.status";
}

/// Top-level JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            id: Some(uuid::Uuid::new_v4().to_string()),
            params,
        }
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Option<String>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<String>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    /// Error response carrying a stable machine-readable reason.
    pub fn rejection(id: Option<String>, code: i32, message: String, reason: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message,
                data: Some(serde_json::json!({ "reason": reason })),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ── Specific Method Payloads ──

/// Parameters addressing a single employee (`employee.get`, `employee.delete`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeIdParams {
    pub id: EmployeeId,
}

/// Parameters for `employee.update`.
///
/// With `replace` set the change set is treated as a wholesale identity
/// replacement instead of a partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeParams {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub changes: UpdateEmployee,
    #[serde(default)]
    pub replace: bool,
}

/// Parameters for `designation.insert`: a new title ranked just below `after`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertDesignationParams {
    pub title: String,
    pub after: String,
}
