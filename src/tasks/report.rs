use std::io::Write;

use crate::tasks::{error::ProvisionError, service::ServiceResult};

pub const SEPARATOR_WIDTH: usize = 70;

/// Destination for completed builder results.
///
/// The collector calls `report` once per builder that signalled readiness,
/// in arrival order.
pub trait ReportSink {
    fn report(&mut self, result: &ServiceResult) -> Result<(), ProvisionError>;
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Renders a result as a separator-delimited block.
///
/// # Examples
/// ```rust
/// use provisioner::tasks::{report::render_block, service::ServiceKind};
///
/// let block = render_block(&ServiceKind::Vault.produce());
/// assert!(block.contains("Vault is Ready!"));
/// assert!(block.starts_with(&"-".repeat(70)));
/// ```
pub fn render_block(result: &ServiceResult) -> String {
    let line = separator();
    format!("{line}\n{result}{line}\n")
}

/// Writes each block to an `io::Write`, flushing after every block.
#[derive(Debug)]
pub struct WriterReporter<W: Write> {
    writer: W,
}

impl<W: Write> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        WriterReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterReporter<W> {
    fn report(&mut self, result: &ServiceResult) -> Result<(), ProvisionError> {
        self.writer.write_all(render_block(result).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
