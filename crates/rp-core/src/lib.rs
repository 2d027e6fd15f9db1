//! rp-core: Core abstractions and configuration for rportcli
//!
//! This crate provides the parameter view, the collaborator traits the CLI
//! implements (connections, token providers, listing client, renderers) and
//! the dispatch-and-stream engine that drives a remote execution.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod traits;
pub mod types;

pub use dispatch::{build_request, DispatchOutcome, Dispatcher, TargetResolver};
pub use error::{
    ApiError, ExecError, RenderError, RequestError, ResolveError, RpError, TransportError,
};
pub use types::{ClientSummary, ClientsPage, Filters, Pagination};
