//! Request path assembly.

use super::options::QueryOptions;

/// One path segment: a record id or a nested-resource name.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A textual segment, URL-encoded when rendered.
    Text(String),
    /// A numeric segment (record id).
    Number(i64),
}

impl PathSegment {
    fn render(&self) -> String {
        match self {
            PathSegment::Text(s) => urlencoding::encode(s).into_owned(),
            PathSegment::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Text(value.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        PathSegment::Text(value)
    }
}

impl From<i32> for PathSegment {
    fn from(value: i32) -> Self {
        PathSegment::Number(i64::from(value))
    }
}

impl From<i64> for PathSegment {
    fn from(value: i64) -> Self {
        PathSegment::Number(value)
    }
}

impl From<u32> for PathSegment {
    fn from(value: u32) -> Self {
        PathSegment::Number(i64::from(value))
    }
}

/// Builds a request path: `endpoint[/segment...][?querystring]`.
///
/// The single path template shared by every entity method. The `?` is
/// appended only when the serialized options are non-empty.
///
/// # Example
///
/// ```
/// use erprest_lib::query::{build_path, QueryOptions};
///
/// let path = build_path(
///     "glSlips",
///     &[42.into()],
///     Some(&QueryOptions::new().fields(["TYPE", "NUMBER"])),
/// );
/// assert_eq!(path, "glSlips/42?fields=TYPE,NUMBER");
/// ```
pub fn build_path(
    endpoint: &str,
    segments: &[PathSegment],
    options: Option<&QueryOptions>,
) -> String {
    let mut path = endpoint.trim_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&segment.render());
    }
    if let Some(options) = options {
        let query = options.to_query_string();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_endpoint() {
        assert_eq!(build_path("glSlips", &[], None), "glSlips");
    }

    #[test]
    fn test_numeric_segment() {
        assert_eq!(build_path("glSlips", &[42.into()], None), "glSlips/42");
    }

    #[test]
    fn test_nested_resource_segments() {
        let path = build_path("glSlips", &[42.into(), "lines".into()], None);
        assert_eq!(path, "glSlips/42/lines");
    }

    #[test]
    fn test_empty_options_omit_question_mark() {
        let path = build_path("glSlips", &[], Some(&QueryOptions::new()));
        assert_eq!(path, "glSlips");
    }

    #[test]
    fn test_query_string_appended() {
        let path = build_path("glSlips", &[], Some(&QueryOptions::new().limit(10)));
        assert_eq!(path, "glSlips?limit=10");
    }

    #[test]
    fn test_text_segment_encoded() {
        let path = build_path("files", &["a b".into()], None);
        assert_eq!(path, "files/a%20b");
    }

    #[test]
    fn test_endpoint_slashes_trimmed() {
        assert_eq!(build_path("/glSlips/", &[1.into()], None), "glSlips/1");
    }
}
