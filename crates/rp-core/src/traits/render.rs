//! Job rendering trait

use rp_protocol::JobRecord;

use crate::error::RenderError;

/// Receives each job record as it arrives
///
/// Any error is fatal to the running dispatch.
pub trait JobRenderer: Send {
    fn render_job(&mut self, job: &JobRecord) -> Result<(), RenderError>;
}

impl<T: JobRenderer + ?Sized> JobRenderer for Box<T> {
    fn render_job(&mut self, job: &JobRecord) -> Result<(), RenderError> {
        (**self).render_job(job)
    }
}
