//! rportcli: Command-line interface for rport
//!
//! Runs commands and scripts on rport clients and streams the job results
//! back as they finish.

pub mod api;
pub mod commands;
pub mod output;
pub mod session;
pub mod signal;
pub mod ws;
