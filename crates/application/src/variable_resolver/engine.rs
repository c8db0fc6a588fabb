//! Variable resolution engine
//!
//! Resolves `{{variable}}` references against fixtures and configuration.

use apiprobe_domain::{Fixtures, RequestSpec, RunConfig};
use thiserror::Error;

use super::parser::parse_variables;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSource {
    /// Captured by an earlier case in the same suite.
    Fixture,
    /// Run configuration (environment).
    Config,
}

/// A successfully resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// Variable name.
    pub name: String,
    /// Substituted text.
    pub value: String,
    /// Where it came from.
    pub source: VariableSource,
}

/// A reference that neither fixtures nor configuration could satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved variable '{name}'")]
pub struct UnresolvedVariable {
    /// The first unresolved name.
    pub name: String,
}

/// Result of variable resolution for a string.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    /// The resolved string; unresolved references are left as written.
    pub resolved: String,

    /// Variables that were successfully resolved.
    pub resolved_variables: Vec<ResolvedVariable>,

    /// Variable names that could not be resolved.
    pub unresolved: Vec<String>,
}

impl ResolutionResult {
    /// Whether all variables were successfully resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Converts into the resolved string, failing on the first unresolved name.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedVariable`] if any reference was left unresolved.
    pub fn into_resolved(self) -> Result<String, UnresolvedVariable> {
        match self.unresolved.into_iter().next() {
            Some(name) => Err(UnresolvedVariable { name }),
            None => Ok(self.resolved),
        }
    }
}

/// Values a resolver can draw from. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    config: &'a RunConfig,
    fixtures: &'a Fixtures,
}

impl<'a> ResolutionContext<'a> {
    /// Creates a context over configuration and fixtures.
    #[must_use]
    pub const fn new(config: &'a RunConfig, fixtures: &'a Fixtures) -> Self {
        Self { config, fixtures }
    }
}

/// The variable resolution engine.
///
/// Fixtures take precedence over configuration values of the same name.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    context: ResolutionContext<'a>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a new resolver with the given context.
    #[must_use]
    pub const fn new(context: ResolutionContext<'a>) -> Self {
        Self { context }
    }

    /// Resolves all variables in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        let mut resolved_variables = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(resolved) = self.resolve_variable(&var_ref.name) {
                result.push_str(&resolved.value);
                resolved_variables.push(resolved);
            } else {
                result.push_str(&input[var_ref.span.clone()]);
                unresolved.push(var_ref.name.clone());
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        ResolutionResult {
            resolved: result,
            resolved_variables,
            unresolved,
        }
    }

    /// Resolves every templated field of a request descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first [`UnresolvedVariable`] found in the URL, headers
    /// or body.
    pub fn resolve_request(&self, request: &RequestSpec) -> Result<RequestSpec, UnresolvedVariable> {
        let mut resolved = request.clone();
        resolved.url = self.resolve(&request.url).into_resolved()?;
        for value in resolved.headers.values_mut() {
            *value = self.resolve(value).into_resolved()?;
        }
        for text in resolved.body.strings_mut() {
            *text = self.resolve(text).into_resolved()?;
        }
        Ok(resolved)
    }

    fn resolve_variable(&self, name: &str) -> Option<ResolvedVariable> {
        if let Some(value) = self.context.fixtures.render(name) {
            return Some(ResolvedVariable {
                name: name.to_string(),
                value,
                source: VariableSource::Fixture,
            });
        }
        self.context.config.get(name).map(|value| ResolvedVariable {
            name: name.to_string(),
            value: value.to_string(),
            source: VariableSource::Config,
        })
    }
}
