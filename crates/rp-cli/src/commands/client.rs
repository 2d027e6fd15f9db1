//! Client list command implementation

use anyhow::{Context, Result};

use rp_core::traits::ListingClient;
use rp_core::types::{Filters, Pagination};

use crate::output::{format_clients, OutputFormat};
use crate::session::Session;

/// Execute the client list command
pub async fn client_list_command(
    session: &Session,
    names: Option<&str>,
    search: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let filters = Filters::new()
        .with("name", names.unwrap_or_default())
        .with("*", search.unwrap_or_default());

    let page = session
        .api
        .list_clients(Pagination::default(), filters)
        .await
        .context("Failed to list clients")?;

    match output {
        OutputFormat::Human => println!("{}", format_clients(&page.data)),
        OutputFormat::Json => {
            for client in &page.data {
                println!("{}", serde_json::to_string(client)?);
            }
        }
    }

    Ok(())
}
