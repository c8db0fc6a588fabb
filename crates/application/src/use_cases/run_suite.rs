//! Suite execution.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use apiprobe_domain::{Fixtures, RunConfig, SuiteReport, TestSuite};
use tracing::info;

use super::run_case::{CaseContext, RunCase};
use crate::ports::{AssertionEvaluator, HttpClient};

/// Runs the cases of one suite in declaration order.
///
/// A failing case never stops the suite. Fixtures live only for the
/// duration of one call to [`RunSuite::run`].
pub struct RunSuite<C: HttpClient, E: AssertionEvaluator> {
    run_case: RunCase<C, E>,
    config: Arc<RunConfig>,
}

impl<C: HttpClient, E: AssertionEvaluator> RunSuite<C, E> {
    /// Creates the use case.
    pub const fn new(client: Arc<C>, evaluator: Arc<E>, config: Arc<RunConfig>) -> Self {
        Self {
            run_case: RunCase::new(client, evaluator),
            config,
        }
    }

    /// The configuration every case in the suite sees.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs every case and aggregates the results.
    pub async fn run(&self, suite: &TestSuite) -> SuiteReport {
        let started = Instant::now();
        info!(suite = %suite.name, cases = suite.len(), "running suite");

        let suite_captures: BTreeSet<String> = suite
            .cases
            .iter()
            .flat_map(|case| case.captures.iter().map(|c| c.name.clone()))
            .collect();
        let mut fixtures = Fixtures::new();
        let mut reports = Vec::with_capacity(suite.len());

        for case in &suite.cases {
            let ctx = CaseContext {
                config: &self.config,
                fixtures: &fixtures,
                suite_captures: &suite_captures,
            };
            let run = self.run_case.run(case, ctx).await;
            for (name, value) in run.captured {
                fixtures.insert(name, value);
            }
            reports.push(run.report);
        }

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = started.elapsed().as_millis() as u64;
        let report = SuiteReport::new(suite.name.clone(), reports, duration_ms);
        info!(
            suite = %report.suite_name,
            passed = report.passed,
            failed = report.failed,
            "suite finished"
        );
        report
    }
}
