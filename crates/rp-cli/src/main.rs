//! rportcli
//!
//! Command line client for the rport server:
//! - Run commands and scripts on one or many clients
//! - List clients
//! - Manage the local configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rp_core::config::{self, keys, ParameterBag};
use rportcli::commands;
use rportcli::output::OutputFormat;
use rportcli::session::Session;
use rportcli::signal::spawn_interrupt_listener;

#[derive(Parser)]
#[command(name = "rportcli")]
#[command(author, version, about = "Command line client for the rport remote management server")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, env = "RPORT_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    output: OutputFormat,

    #[command(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ApiArgs {
    /// Base URL of the rport server
    #[arg(long, global = true, env = "RPORT_API_URL")]
    api_url: Option<String>,

    /// User for password login
    #[arg(long, global = true, env = "RPORT_API_USER")]
    api_user: Option<String>,

    /// Password for password login
    #[arg(long, global = true, env = "RPORT_API_PASSWORD", hide_env_values = true)]
    api_password: Option<String>,

    /// API token, used instead of user and password
    #[arg(long, global = true, env = "RPORT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command on remote clients
    Command {
        /// Command to run
        #[arg(short, long)]
        command: String,

        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        exec: ExecArgs,
    },

    /// Run a local script on remote clients
    Script {
        /// Path to the script file
        #[arg(long)]
        script: PathBuf,

        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        exec: ExecArgs,
    },

    /// Inspect clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Comma separated client ids
    #[arg(short = 'd', long)]
    cids: Option<String>,

    /// Comma separated client names, wildcards allowed
    #[arg(short, long)]
    names: Option<String>,

    /// Search clients on all fields
    #[arg(long)]
    search: Option<String>,

    /// Comma separated client group ids
    #[arg(short, long)]
    gids: Option<String>,
}

#[derive(Args)]
struct ExecArgs {
    /// Execution timeout in seconds
    #[arg(short, long, default_value_t = keys::DEFAULT_CMD_TIMEOUT_SECONDS)]
    timeout: i64,

    /// Run on all clients at the same time
    #[arg(long)]
    conc: bool,

    /// Stop on the first failed client
    #[arg(long)]
    abort: bool,

    /// Working directory on the clients
    #[arg(long)]
    cwd: Option<String>,

    /// Run with elevated privileges
    #[arg(short, long)]
    sudo: bool,

    /// Interpreter on the clients (e.g. cmd, powershell, tacoscript)
    #[arg(short, long)]
    interpreter: Option<String>,
}

#[derive(Subcommand)]
enum ClientAction {
    /// List clients
    List {
        /// Comma separated client names, wildcards allowed
        #[arg(short, long)]
        names: Option<String>,

        /// Search clients on all fields
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Create a configuration file from flags and environment
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl TargetArgs {
    fn apply(&self, params: &mut ParameterBag) {
        params.set_opt(keys::CLIENT_IDS, self.cids.clone());
        params.set_opt(keys::CLIENT_NAMES, self.names.clone());
        params.set_opt(keys::CLIENT_SEARCH, self.search.clone());
        params.set_opt(keys::GROUP_IDS, self.gids.clone());
    }
}

impl ExecArgs {
    fn apply(&self, params: &mut ParameterBag) {
        params.set(keys::TIMEOUT, self.timeout.to_string());
        params.set(keys::EXEC_CONCURRENTLY, self.conc.to_string());
        params.set(keys::ABORT_ON_ERROR, self.abort.to_string());
        params.set(keys::IS_SUDO, self.sudo.to_string());
        params.set_opt(keys::CWD, self.cwd.clone());
        params.set_opt(keys::INTERPRETER, self.interpreter.clone());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = config::resolve_config_path(cli.config.as_deref());
    let client_config = commands::load_client_config(&config_path)?.overlay(
        cli.api.api_url,
        cli.api.api_user,
        cli.api.api_password,
        cli.api.api_token,
    );

    match cli.command {
        Commands::Command {
            command,
            targets,
            exec,
        } => {
            let mut params = ParameterBag::new();
            targets.apply(&mut params);
            exec.apply(&mut params);
            params.set(keys::COMMAND, command);

            let session = Session::from_config(&client_config)?;
            let interrupt = spawn_interrupt_listener();
            commands::command_command(&session, &params, cli.output, &interrupt).await?;
        }

        Commands::Script {
            script,
            targets,
            exec,
        } => {
            let mut params = ParameterBag::new();
            targets.apply(&mut params);
            exec.apply(&mut params);

            let session = Session::from_config(&client_config)?;
            let interrupt = spawn_interrupt_listener();
            commands::script_command(&session, params, &script, cli.output, &interrupt).await?;
        }

        Commands::Client { action } => match action {
            ClientAction::List { names, search } => {
                let session = Session::from_config(&client_config)?;
                commands::client_list_command(
                    &session,
                    names.as_deref(),
                    search.as_deref(),
                    cli.output,
                )
                .await?;
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config_show(&config_path, &client_config)?;
            }
            ConfigAction::Path => {
                commands::config_path(&config_path)?;
            }
            ConfigAction::Init { force } => {
                commands::config_init(&config_path, &client_config, force)?;
            }
        },
    }

    Ok(())
}
