//! Output formatting utilities for the CLI
//!
//! Job renderers for streamed results, a table for the client listing, and
//! colored status messages.

mod job;

pub use job::{job_renderer, HumanJobRenderer, JsonJobRenderer};

use clap::ValueEnum;
use tabled::{settings::Style, Table, Tabled};

use rp_core::types::ClientSummary;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Key/value blocks for people
    #[default]
    Human,
    /// One compact JSON object per line
    Json,
}

/// Format a list of clients as an ASCII table
///
/// Returns "No clients found" if the list is empty.
pub fn format_clients(clients: &[ClientSummary]) -> String {
    if clients.is_empty() {
        return "No clients found".to_string();
    }

    #[derive(Tabled)]
    struct ClientRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "HOSTNAME")]
        hostname: String,
        #[tabled(rename = "OS KERNEL")]
        os_kernel: String,
        #[tabled(rename = "STATUS")]
        status: String,
    }

    let rows: Vec<ClientRow> = clients
        .iter()
        .map(|c| ClientRow {
            id: truncate(&c.id, 36),
            name: or_dash(&c.name),
            hostname: or_dash(&c.hostname),
            os_kernel: or_dash(&c.os_kernel),
            status: if c.is_connected() {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Truncate a string with ellipsis if too long
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red with an X prefix
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning message in yellow with a warning symbol prefix
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan with an info symbol prefix
///
/// Goes to stderr so that job output on stdout stays machine readable.
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
