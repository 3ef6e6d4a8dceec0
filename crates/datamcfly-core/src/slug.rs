//! URL template ("slug") rendering
//!
//! Slugs are paths relative to the API base URL with named placeholders:
//!
//! ```text
//! apps/{db}/collections/{col}/{id}
//! ```
//!
//! Rendering fails fast when a placeholder has no value instead of producing
//! a malformed path. Values are percent-encoded as single path segments.

use std::fmt;

use crate::error::{CoreError, Result};
use crate::settings::Operation;

/// A placeholder that may appear in a slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Database (app) name
    Db,
    /// Collection name
    Col,
    /// Document identifier
    Id,
}

impl Placeholder {
    /// Name as written between braces in a slug
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Db => "db",
            Placeholder::Col => "col",
            Placeholder::Id => "id",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "db" => Some(Placeholder::Db),
            "col" => Some(Placeholder::Col),
            "id" => Some(Placeholder::Id),
            _ => None,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.as_str())
    }
}

/// Path parameter values substituted into a slug
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    db: Option<String>,
    col: Option<String>,
    id: Option<String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database name
    pub fn db(mut self, db: impl Into<String>) -> Self {
        self.db = Some(db.into());
        self
    }

    /// Set the collection name
    pub fn col(mut self, col: impl Into<String>) -> Self {
        self.col = Some(col.into());
        self
    }

    /// Set the document identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Value for a placeholder, if one was supplied
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::Db => self.db.as_deref(),
            Placeholder::Col => self.col.as_deref(),
            Placeholder::Id => self.id.as_deref(),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(Placeholder),
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>> {
    let invalid = |reason: &str| CoreError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut rest = template;
    while !rest.is_empty() {
        match rest.find(['{', '}']) {
            None => {
                segments.push(Segment::Literal(rest));
                break;
            }
            Some(pos) if rest[pos..].starts_with('}') => {
                return Err(invalid("unmatched '}'"));
            }
            Some(pos) => {
                if pos > 0 {
                    segments.push(Segment::Literal(&rest[..pos]));
                }
                let after = &rest[pos + 1..];
                let end = after
                    .find('}')
                    .ok_or_else(|| invalid("unterminated placeholder"))?;
                let name = &after[..end];
                let placeholder = Placeholder::from_name(name)
                    .ok_or_else(|| invalid(&format!("unknown placeholder '{}'", name)))?;
                segments.push(Segment::Param(placeholder));
                rest = &after[end + 1..];
            }
        }
    }
    Ok(segments)
}

/// Placeholders a slug requires, in order of appearance
pub fn placeholders(template: &str) -> Result<Vec<Placeholder>> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Param(p) => Some(p),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Render `template` for `operation` with the given path parameters
///
/// Empty values count as missing. Values made only of dots are rejected since
/// URL resolution would treat them as `.`/`..` segments and change the path.
pub fn render(operation: Operation, template: &str, params: &PathParams) -> Result<String> {
    let mut path = String::with_capacity(template.len());
    for segment in parse(template)? {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Param(placeholder) => {
                let value = params
                    .get(placeholder)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| CoreError::MissingParameter {
                        operation: operation.to_string(),
                        parameter: placeholder.as_str().to_string(),
                    })?;
                if value.chars().all(|c| c == '.') {
                    return Err(CoreError::InvalidParameter {
                        operation: operation.to_string(),
                        parameter: placeholder.as_str().to_string(),
                        value: value.to_string(),
                    });
                }
                path.push_str(&urlencoding::encode(value));
            }
        }
    }
    Ok(path)
}
