//! Assertion evaluation port

use apiprobe_domain::{Assertion, AssertionResult, ConfigMissing, ResponseSpec, RunConfig};

/// Evaluates single assertions.
///
/// Implementations must be pure: the same inputs give the same result.
pub trait AssertionEvaluator: Send + Sync {
    /// Evaluates a response assertion.
    fn evaluate(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult;

    /// Evaluates a configuration assertion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigMissing`] when the named value is not set.
    fn evaluate_config(
        &self,
        assertion: &Assertion,
        config: &RunConfig,
    ) -> Result<AssertionResult, ConfigMissing>;
}
