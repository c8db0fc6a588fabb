//! Run report rendering.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use apiprobe_domain::RunReport;

use crate::serialization::SerializationError;

/// Renders a finished run.
pub trait Reporter {
    /// Produces the full report text.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the report cannot be encoded.
    fn render(&self, report: &RunReport) -> Result<String, SerializationError>;
}
