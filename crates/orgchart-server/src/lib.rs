//! Org chart server - JSON-RPC API over the hierarchy engine
//!
//! Wires the designation catalog and the employee tree into a single
//! `OrgDirectory`, shares it behind a lock, and exposes it as a JSON-RPC 2.0
//! API over TCP. Every mutation goes through validation in
//! `orgchart-hierarchy` before anything is written.

pub mod config;
pub mod directory;
pub mod rpc_server;
pub mod views;

pub use config::DirectoryConfig;
pub use directory::{OrgDirectory, SharedDirectory};
pub use rpc_server::RpcServer;
pub use views::{EmployeeSummary, EmployeeView};
