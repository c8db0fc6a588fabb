//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in request
//! descriptors. Names resolve against suite fixtures first, then the run
//! configuration.
//!
//! # Usage
//!
//! ```
//! use apiprobe_application::variable_resolver::{ResolutionContext, VariableResolver};
//! use apiprobe_domain::{Fixtures, RunConfig};
//!
//! let config = RunConfig::new().with("API_BASE_URL", "https://example.com");
//! let fixtures = Fixtures::new();
//! let resolver = VariableResolver::new(ResolutionContext::new(&config, &fixtures));
//!
//! let result = resolver.resolve("{{API_BASE_URL}}/users");
//! assert_eq!(result.resolved, "https://example.com/users");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{
    ResolutionContext, ResolutionResult, ResolvedVariable, UnresolvedVariable, VariableResolver,
    VariableSource,
};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
