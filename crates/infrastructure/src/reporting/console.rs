//! Human-readable report.

use std::fmt::Write as _;

use apiprobe_domain::{CaseKind, CaseReport, RunReport, SuiteReport};

use super::Reporter;
use crate::serialization::SerializationError;

/// Plain-text reporter with one line per case.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    show_assertions: bool,
}

impl ConsoleReporter {
    /// Creates a reporter that lists only failure details.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            show_assertions: false,
        }
    }

    /// Also list every evaluated assertion under each case.
    #[must_use]
    pub const fn with_assertions(mut self, show: bool) -> Self {
        self.show_assertions = show;
        self
    }

    fn write_suite(&self, out: &mut String, suite: &SuiteReport) {
        let _ = writeln!(out, "{}", suite.suite_name);
        for case in &suite.cases {
            self.write_case(out, case);
        }
        let _ = writeln!(
            out,
            "  {} passed, {} failed ({} ms)",
            suite.passed, suite.failed, suite.duration_ms
        );
        out.push('\n');
    }

    fn write_case(&self, out: &mut String, case: &CaseReport) {
        let mark = if case.passed() { '✓' } else { '✗' };
        let tag = match case.kind {
            CaseKind::Integration => " [integration]",
            CaseKind::Independent => "",
        };
        let _ = writeln!(out, "  {mark} {}{tag} ({} ms)", case.name, case.duration_ms);

        if self.show_assertions {
            for result in &case.assertions {
                let mark = if result.passed { '✓' } else { '✗' };
                let _ = writeln!(out, "      {mark} {}", result.assertion.description());
            }
        }

        if let Some(detail) = case.outcome.detail() {
            let _ = writeln!(out, "      {}: {detail}", case.outcome.label());
        }
    }
}

impl Reporter for ConsoleReporter {
    fn render(&self, report: &RunReport) -> Result<String, SerializationError> {
        let mut out = String::new();
        for suite in &report.suites {
            self.write_suite(&mut out, suite);
        }
        let _ = writeln!(
            out,
            "{} passed, {} failed, {} total in {} ms",
            report.passed(),
            report.failed(),
            report.total(),
            report.duration_ms
        );
        Ok(out)
    }
}
