//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}), trimmed.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

/// Parses a string and extracts all `{{name}}` references.
///
/// Empty references (`{{}}`, `{{  }}`) are skipped. An unclosed `{{`
/// ends parsing.
///
/// # Examples
///
/// ```
/// use apiprobe_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{API_BASE_URL}}/users/{{userId}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "API_BASE_URL");
/// assert_eq!(refs[1].name, "userId");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut offset = 0;

    while let Some(open) = input[offset..].find("{{") {
        let start = offset + open;
        let inner_start = start + 2;
        let Some(close) = input[inner_start..].find("}}") else {
            break;
        };
        let end = inner_start + close + 2;

        let name = input[inner_start..inner_start + close].trim();
        if !name.is_empty() {
            references.push(VariableReference {
                name: name.to_string(),
                span: start..end,
            });
        }
        offset = end;
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    !parse_variables(input).is_empty()
}

/// Extracts just the variable names from the input without full parsing info.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input).into_iter().map(|r| r.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{API_BASE_URL}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "API_BASE_URL");
        assert_eq!(refs[0].span, 0..16);
    }

    #[test]
    fn test_parse_multiple_variables() {
        let refs = parse_variables("{{base}}/api/{{version}}/users/{{id}}");
        assert_eq!(
            refs.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["base", "version", "id"]
        );
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ name }}");
        assert_eq!(refs[0].name, "name");
    }

    #[test]
    fn test_empty_and_unclosed() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
        assert!(parse_variables("{{name").is_empty());
        assert!(parse_variables("{name}").is_empty());
        assert!(parse_variables("Hello, World!").is_empty());
    }

    #[test]
    fn test_adjacent_variables() {
        assert_eq!(extract_variable_names("{{a}}{{b}}{{c}}"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_has_variables() {
        assert!(has_variables("Hello {{name}}!"));
        assert!(!has_variables("{{incomplete"));
        assert!(!has_variables("incomplete}}"));
    }

    #[test]
    fn test_span_positions() {
        let input = "https://{{host}}/users";
        let refs = parse_variables(input);
        assert_eq!(&input[refs[0].span.clone()], "{{host}}");
    }
}
