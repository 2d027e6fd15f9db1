//! Parameter keys read when building and resolving an execution request

/// Comma separated client ids
pub const CLIENT_IDS: &str = "cids";
/// Comma separated client names
pub const CLIENT_NAMES: &str = "names";
/// Free-text client search
pub const CLIENT_SEARCH: &str = "search";
/// Command line to run
pub const COMMAND: &str = "command";
/// Encoded script body to run
pub const SCRIPT: &str = "script";
/// Comma separated client group ids
pub const GROUP_IDS: &str = "gids";
/// Server-side timeout in seconds
pub const TIMEOUT: &str = "timeout";
/// Run on all clients in parallel
pub const EXEC_CONCURRENTLY: &str = "conc";
/// Stop once a client fails
pub const ABORT_ON_ERROR: &str = "abort";
/// Working directory on the clients
pub const CWD: &str = "cwd";
/// Run with elevated privileges
pub const IS_SUDO: &str = "sudo";
/// Interpreter for the command or script
pub const INTERPRETER: &str = "interpreter";

pub const DEFAULT_CMD_TIMEOUT_SECONDS: i64 = rp_protocol::DEFAULT_TIMEOUT_SECS as i64;
