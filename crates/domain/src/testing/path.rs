//! Minimal JSON path expressions for body assertions.
//!
//! Supported syntax: `$`, `$.field`, `$.field.nested`, `$.array[0]`,
//! `$.array[*]`, `$.array[*].field` and `[0]` on the root. The leading `$`
//! is optional, so `data.id` and `$.data.id` are the same path.
//!
//! Segments after `[*]` are applied to every element and the results are
//! collected into a new array. If any element lacks the rest of the path,
//! the whole query finds nothing.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field.
    Key(String),
    /// Array index.
    Index(usize),
    /// All array elements.
    Wildcard,
}

/// A parsed JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidJsonPath`] for unbalanced brackets or
    /// non-numeric indices.
    pub fn parse(path: &str) -> DomainResult<Self> {
        let raw = path.trim();
        let rest = raw.strip_prefix('$').unwrap_or(raw);
        let rest = rest.strip_prefix('.').unwrap_or(rest);

        let mut segments = Vec::new();
        for part in split_path_segments(rest).map_err(|reason| invalid(raw, reason))? {
            let (name, indices) = parse_array_access(&part).map_err(|reason| invalid(raw, reason))?;
            if !name.is_empty() {
                segments.push(PathSegment::Key(name));
            }
            for index in indices {
                if index == "*" {
                    segments.push(PathSegment::Wildcard);
                } else {
                    let idx = index
                        .parse::<usize>()
                        .map_err(|_| invalid(raw, format!("invalid array index: {index}")))?;
                    segments.push(PathSegment::Index(idx));
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the root path `$`.
    #[must_use]
    pub fn root() -> Self {
        Self {
            raw: "$".to_string(),
            segments: Vec::new(),
        }
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Looks up the value this path points at.
    ///
    /// Plain paths borrow from `json`; wildcard projections build an owned
    /// array.
    #[must_use]
    pub fn query<'a>(&self, json: &'a Value) -> Option<Cow<'a, Value>> {
        query_segments(&self.segments, json)
    }
}

fn query_segments<'a>(segments: &[PathSegment], json: &'a Value) -> Option<Cow<'a, Value>> {
    let mut current = json;
    for (position, segment) in segments.iter().enumerate() {
        current = match segment {
            PathSegment::Key(key) => current.get(key)?,
            PathSegment::Index(idx) => current.get(*idx)?,
            PathSegment::Wildcard => {
                let items = current.as_array()?;
                let rest = &segments[position + 1..];
                if rest.is_empty() {
                    return Some(Cow::Borrowed(current));
                }
                return items
                    .iter()
                    .map(|item| query_segments(rest, item).map(Cow::into_owned))
                    .collect::<Option<Vec<_>>>()
                    .map(|projected| Cow::Owned(Value::Array(projected)));
            }
        };
    }
    Some(Cow::Borrowed(current))
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidJsonPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Result<Vec<String>, String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if current.is_empty() {
                    return Err("empty path segment".to_string());
                }
                segments.push(std::mem::take(&mut current));
            }
            '[' if !in_bracket => {
                in_bracket = true;
                current.push(ch);
            }
            ']' if in_bracket => {
                in_bracket = false;
                current.push(ch);
            }
            '[' | ']' => return Err("unbalanced brackets".to_string()),
            _ => current.push(ch),
        }
    }

    if in_bracket {
        return Err("unbalanced brackets".to_string());
    }
    if !current.is_empty() {
        segments.push(current);
    } else if !segments.is_empty() {
        return Err("trailing '.'".to_string());
    }

    Ok(segments)
}

/// Parse access like "field[0][1]" into ("field", ["0", "1"]).
fn parse_array_access(segment: &str) -> Result<(String, Vec<String>), String> {
    let Some(bracket_start) = segment.find('[') else {
        return Ok((segment.to_string(), Vec::new()));
    };

    let name = segment[..bracket_start].to_string();
    let mut indices = Vec::new();
    let mut rest = &segment[bracket_start..];
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.find(']').map(|end| (&r[..end], &r[end + 1..])));
        match inner {
            Some((index, tail)) if !index.is_empty() => {
                indices.push(index.trim().to_string());
                rest = tail;
            }
            _ => return Err(format!("malformed index in '{segment}'")),
        }
    }
    Ok((name, indices))
}
