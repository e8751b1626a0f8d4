/// Level increment used when a designation is inserted below the lowest
/// rank in the catalog and there is no lower neighbour to split against.
pub const LEVEL_STEP: f64 = 1.0;

/// JSON-RPC protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

/// Default bind address of the directory RPC server.
pub const DEFAULT_RPC_ADDR: &str = "127.0.0.1:9480";

/// Default cap on concurrently served RPC connections.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/orgchart.toml";

// ── JSON-RPC error codes ──

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// The addressed employee or designation does not exist.
pub const RECORD_NOT_FOUND: i32 = -32004;

/// First code of the block reserved for hierarchy rejections.
/// Each rejection owns one code in `REJECTION_CODE_BASE - 11..=REJECTION_CODE_BASE`.
pub const REJECTION_CODE_BASE: i32 = -32010;
