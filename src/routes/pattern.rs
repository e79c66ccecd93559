//! Path patterns: literal segments, `:name` captures, and the internal catch-all.

use std::fmt;

use super::{Params, RouteError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled URL pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    catch_all: bool,
}

impl PathPattern {
    /// Compile a declared path such as `/usuarios/doctores` or `/pacientes/:id`
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        if !path.starts_with('/') {
            return Err(RouteError::NotAbsolute(path.to_string()));
        }

        let mut segments = Vec::new();
        for part in path.split('/').filter(|s| !s.is_empty()) {
            if part.contains('*') {
                return Err(RouteError::Wildcard(path.to_string()));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(RouteError::EmptyParam(path.to_string())),
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: normalize_path(path),
            segments,
            catch_all: false,
        })
    }

    /// Pattern matching every path; only the table builder creates one
    pub(super) fn catch_all() -> Self {
        Self {
            raw: "*".to_string(),
            segments: Vec::new(),
            catch_all: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    pub fn is_index(&self) -> bool {
        !self.catch_all && self.segments.is_empty()
    }

    /// Match a normalized path, returning captured params
    ///
    /// Segments are percent-decoded before comparison and literals match
    /// ASCII case-insensitively.
    pub fn matches(&self, path: &str) -> Option<Params> {
        if self.catch_all {
            return Some(Params::new());
        }

        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            let decoded = urlencoding::decode(part)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| part.to_string());
            match segment {
                Segment::Literal(literal) if literal.eq_ignore_ascii_case(&decoded) => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), decoded);
                }
            }
        }

        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Strip query and fragment, collapse duplicate and trailing slashes
pub fn normalize_path(url: &str) -> String {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", parts.join("/"))
}
