//! CLI command implementations

mod client;
mod config;
mod exec;

pub use client::client_list_command;
pub use config::{config_init, config_path, config_show, load_client_config};
pub use exec::{command_command, encode_script, script_command};
