//! Org chart protocol - core record types and message definitions
//!
//! Shared vocabulary for every layer of the directory: identifiers,
//! designation and employee records, the strongly-typed mutation inputs
//! accepted by the hierarchy validator, and the JSON-RPC 2.0 envelope
//! spoken by the directory server.

pub mod identity;
pub mod messages;
pub mod types;
pub mod error;
pub mod constants;

pub use identity::*;
pub use messages::*;
pub use types::*;
pub use error::*;
pub use constants::*;
