//! Path normalization and navigation target parsing.
//!
//! # Responsibilities
//! - Validate declared route paths at registration
//! - Split a navigation target into path, query pairs and fragment
//! - Normalize both sides the same way so lookups are exact
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Trailing `/` is insignificant except for the root
//! - No patterns or params: exact match only

use url::form_urlencoded;

/// Errors for malformed route paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path must start with '/': {0:?}")]
    NotAbsolute(String),

    #[error("path contains an empty segment: {0:?}")]
    EmptySegment(String),

    #[error("path contains whitespace, '?' or '#': {0:?}")]
    IllegalCharacter(String),
}

/// Normalize an already well-formed path: strip the trailing `/` unless root.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a declared route path and return its normalized form.
pub fn validate_route_path(path: &str) -> Result<String, PathError> {
    if !path.starts_with('/') {
        return Err(PathError::NotAbsolute(path.to_string()));
    }
    if path.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(PathError::IllegalCharacter(path.to_string()));
    }
    let normalized = normalize_path(path);
    if normalized.len() > 1 && normalized[1..].split('/').any(str::is_empty) {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    Ok(normalized)
}

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    /// Normalized path, exactly as written (no percent-decoding).
    pub path: String,
    /// Query pairs in order of appearance, form-decoded.
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

/// Parse a navigation target such as `/settings/?tab=profile#top`.
///
/// Targets without a leading `/` are resolved against the root.
pub fn parse_target(target: &str) -> Target {
    let (rest, fragment) = match target.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (target, None),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let path = path.trim();
    let path = if path.starts_with('/') {
        normalize_path(path)
    } else {
        normalize_path(&format!("/{path}"))
    };

    Target {
        path,
        query: form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        fragment,
    }
}

/// Build `path?key=value` with `value` form-encoded.
pub fn with_query_param(path: &str, key: &str, value: &str) -> String {
    let encoded: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{encoded}")
}
