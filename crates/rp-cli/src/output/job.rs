//! Job renderers

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use rp_core::error::RenderError;
use rp_core::traits::JobRenderer;
use rp_protocol::JobRecord;

use super::OutputFormat;

/// Renderer for `format` writing to `out`
pub fn job_renderer<W: Write + Send + 'static>(format: OutputFormat, out: W) -> Box<dyn JobRenderer> {
    match format {
        OutputFormat::Human => Box::new(HumanJobRenderer::new(out)),
        OutputFormat::Json => Box::new(JsonJobRenderer::new(out)),
    }
}

/// Writes each job as an aligned key/value block
pub struct HumanJobRenderer<W> {
    out: W,
}

impl<W: Write + Send> HumanJobRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> JobRenderer for HumanJobRenderer<W> {
    fn render_job(&mut self, job: &JobRecord) -> Result<(), RenderError> {
        let rows = [
            ("Job ID", job.jid.clone()),
            ("Status", job.status.clone()),
            ("Client ID", job.client_id.clone()),
            ("Client Name", job.client_name.clone().unwrap_or_default()),
            ("Command", job.command.clone()),
            ("Interpreter", job.interpreter.clone()),
            ("Cwd", job.cwd.clone()),
            ("Is Sudo", job.is_sudo.to_string()),
            ("Pid", job.pid.map(|p| p.to_string()).unwrap_or_default()),
            ("Started at", timestamp(job.started_at)),
            ("Finished at", timestamp(job.finished_at)),
            ("Timeout sec", job.timeout_sec.to_string()),
            ("Created By", job.created_by.clone()),
            ("Multi Job ID", job.multi_job_id.clone()),
            ("Error", job.error.clone()),
            ("Stdout", job.result.stdout.clone()),
            ("Stderr", job.result.stderr.clone()),
        ];

        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in rows {
            writeln!(self.out, "{:<width$}  {}", format!("{}:", key), value, width = width + 1)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Writes each job as one compact JSON line
pub struct JsonJobRenderer<W> {
    out: W,
}

impl<W: Write + Send> JsonJobRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> JobRenderer for JsonJobRenderer<W> {
    fn render_job(&mut self, job: &JobRecord) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.out, job)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
