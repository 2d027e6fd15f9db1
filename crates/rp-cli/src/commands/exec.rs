//! Command and script execution

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use tokio_util::sync::CancellationToken;

use rp_core::config::{keys, ParameterBag};
use rp_core::dispatch::{build_request, split_ids, DispatchOutcome, Dispatcher, TargetResolver};

use crate::output::{job_renderer, print_warning, OutputFormat};
use crate::session::Session;
use crate::ws::{COMMANDS_WS_PATH, SCRIPTS_WS_PATH};

/// Run a shell command on the targeted clients
pub async fn command_command(
    session: &Session,
    params: &ParameterBag,
    output: OutputFormat,
    interrupt: &CancellationToken,
) -> Result<DispatchOutcome> {
    dispatch(session, params, output, interrupt).await
}

/// Upload a local script and run it on the targeted clients
pub async fn script_command(
    session: &Session,
    mut params: ParameterBag,
    script: &Path,
    output: OutputFormat,
    interrupt: &CancellationToken,
) -> Result<DispatchOutcome> {
    params.set(keys::SCRIPT, encode_script(script)?);
    dispatch(session, &params, output, interrupt).await
}

/// Read a script file and base64 encode it for the wire
pub fn encode_script(path: &Path) -> Result<String> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read script file: {:?}", path))?;
    if content.is_empty() {
        anyhow::bail!("Script file is empty: {:?}", path);
    }
    Ok(base64::engine::general_purpose::STANDARD.encode(content))
}

async fn dispatch(
    session: &Session,
    params: &ParameterBag,
    output: OutputFormat,
    interrupt: &CancellationToken,
) -> Result<DispatchOutcome> {
    let client_ids = TargetResolver::new(&session.api).resolve(params).await?;
    tracing::debug!("resolved targets: {}", client_ids);

    let request = build_request(split_ids(&client_ids), params)?;
    let path = if request.payload().is_script() {
        SCRIPTS_WS_PATH
    } else {
        COMMANDS_WS_PATH
    };

    let connection = session.connector.connect(path).await?;

    let mut dispatcher = Dispatcher::new(job_renderer(output, std::io::stdout()));
    let outcome = dispatcher.execute(connection, &request, interrupt).await?;

    match outcome {
        DispatchOutcome::Interrupted { jobs } => {
            print_warning(&format!("Interrupted after {} job(s)", jobs));
        }
        DispatchOutcome::Completed { jobs } => {
            tracing::info!("finished, {} job(s) received", jobs);
        }
    }

    Ok(outcome)
}
