//! Machine-readable report.

use apiprobe_domain::RunReport;

use super::Reporter;
use crate::serialization::{SerializationError, to_json_stable};

/// Pretty JSON reporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn render(&self, report: &RunReport) -> Result<String, SerializationError> {
        to_json_stable(report)
    }
}
