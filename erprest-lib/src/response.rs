//! List response envelope

use serde::Deserialize;
use serde_json::Value;

/// The envelope returned by every list endpoint.
///
/// `items` holds the page of records; the remaining fields echo the
/// pagination state and carry the total `count` when it was requested
/// via `count=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T = Value> {
    /// The records in this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of matching records, when requested.
    #[serde(default)]
    pub count: Option<u64>,
    /// Offset echoed back by the service.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Limit echoed back by the service.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Link to the first page, if paging.
    #[serde(default)]
    pub first: Option<PageLink>,
    /// Link to the next page, if any.
    #[serde(default)]
    pub next: Option<PageLink>,
}

impl<T> ListResponse<T> {
    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the service reported a further page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Consumes the response and returns the records.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// A hypermedia link to another page of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageLink {
    /// The target URL.
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_envelope() {
        let body = r#"{
            "items": [{"CODE": "A"}, {"CODE": "B"}],
            "count": 17,
            "offset": 0,
            "limit": 2,
            "next": {"href": "glSlips?limit=2&offset=2"}
        }"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.count, Some(17));
        assert!(response.has_next());
    }

    #[test]
    fn test_missing_fields_default() {
        let response: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
        assert_eq!(response.count, None);
        assert!(!response.has_next());
    }
}
