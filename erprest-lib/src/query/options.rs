//! Query options and the query-string serializer.

use serde_json::Value;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9). Implied by the wire format and omitted
    /// from the serialized parameter.
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Specifies the ordering of query results.
///
/// One direction applies to all fields: the remote API takes a comma-joined
/// field list with at most a single trailing direction token.
///
/// # Example
///
/// ```
/// use erprest_lib::query::Sort;
///
/// // Single field, ascending implied
/// let sort = Sort::asc("TYPE");
///
/// // Multiple fields sharing one direction
/// let sort = Sort::desc("DATE").then("NUMBER");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    fields: Vec<String>,
    direction: Direction,
}

impl Sort {
    /// Creates a sort on a field with an explicit direction.
    pub fn by(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            fields: vec![field.into()],
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::by(field, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::by(field, Direction::Desc)
    }

    /// Adds a secondary sort field sharing the same direction.
    pub fn then(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Serializes this sort as the `sort` parameter value.
    ///
    /// Ascending direction is omitted; descending appends a trailing
    /// `desc` comma-segment.
    fn to_param(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|f| urlencoding::encode(f).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        match self.direction {
            Direction::Asc => fields,
            Direction::Desc => format!("{},desc", fields),
        }
    }
}

/// The pagination/projection/sort/filter envelope accepted by every
/// list-returning method.
///
/// Serializes to a URL query string with a stable parameter order so
/// generated query strings are reproducible: `limit`, `offset`, `fields`,
/// `sort`, `expand`, `q`, `count`, then extra parameters in insertion
/// order.
///
/// # Example
///
/// ```
/// use erprest_lib::query::{QueryOptions, Sort};
///
/// let options = QueryOptions::new()
///     .limit(10)
///     .offset(0)
///     .sort(Sort::asc("TYPE"));
///
/// assert_eq!(options.to_query_string(), "limit=10&offset=0&sort=TYPE");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    limit: Option<u64>,
    offset: Option<u64>,
    fields: Vec<String>,
    sort: Option<Sort>,
    expand: Vec<String>,
    q: Option<String>,
    count: bool,
    extra: Vec<(String, Value)>,
}

impl QueryOptions {
    /// Creates empty options.
    ///
    /// Empty options serialize to an empty string; callers must then omit
    /// the `?` from the path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of records returned.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the given number of records.
    ///
    /// An explicit zero is emitted as `offset=0`, not treated as absence.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Specifies which fields to return.
    ///
    /// Serializes as a single comma-joined `fields` parameter.
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ordering of results.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Expands nested collections of the entity.
    ///
    /// Serializes as a single comma-joined `expand` parameter.
    pub fn expand<S: Into<String>>(mut self, collections: impl IntoIterator<Item = S>) -> Self {
        self.expand = collections.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the raw filter expression.
    ///
    /// The value is emitted verbatim (URL-encoded) and not re-validated;
    /// it usually comes from [`Criteria::compile`](crate::query::Criteria::compile).
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Requests the total count of matching records.
    ///
    /// Only `count=true` is ever emitted; `false` omits the parameter
    /// entirely.
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Adds an arbitrary extra parameter.
    ///
    /// Extras serialize after the well-known parameters, in insertion
    /// order. A JSON `null` value skips the parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Returns `true` if nothing would be serialized.
    pub fn is_empty(&self) -> bool {
        self.to_query_string().is_empty()
    }

    /// Serializes these options into a URL query string without the
    /// leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }

        if let Some(offset) = self.offset {
            params.push(format!("offset={}", offset));
        }

        if !self.fields.is_empty() {
            params.push(format!("fields={}", join_encoded(&self.fields)));
        }

        if let Some(ref sort) = self.sort {
            params.push(format!("sort={}", sort.to_param()));
        }

        if !self.expand.is_empty() {
            params.push(format!("expand={}", join_encoded(&self.expand)));
        }

        if let Some(ref q) = self.q {
            params.push(format!("q={}", urlencoding::encode(q)));
        }

        if self.count {
            params.push("count=true".to_string());
        }

        for (key, value) in &self.extra {
            if let Some(encoded) = encode_extra(value) {
                params.push(format!("{}={}", urlencoding::encode(key), encoded));
            }
        }

        params.join("&")
    }
}

/// Joins list items with literal commas, URL-encoding each item.
fn join_encoded(items: &[String]) -> String {
    items
        .iter()
        .map(|item| urlencoding::encode(item).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes an extra parameter value, or `None` to skip the parameter.
fn encode_extra(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(urlencoding::encode(s).into_owned()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Compound values go through their JSON text form
        other => Some(urlencoding::encode(&other.to_string()).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_empty_options_serialize_to_empty_string() {
        assert_eq!(QueryOptions::new().to_query_string(), "");
        assert!(QueryOptions::new().is_empty());
    }

    #[test]
    fn test_parameter_order_is_stable() {
        let qs = QueryOptions::new()
            .limit(10)
            .offset(0)
            .sort(Sort::asc("TYPE"))
            .to_query_string();
        assert_eq!(qs, "limit=10&offset=0&sort=TYPE");
    }

    #[test]
    fn test_fields_single_comma_joined_parameter() {
        let qs = QueryOptions::new().fields(["TYPE", "NUMBER"]).to_query_string();
        assert_eq!(qs, "fields=TYPE,NUMBER");
    }

    #[test]
    fn test_sort_by_explicit_direction() {
        assert_eq!(
            QueryOptions::new()
                .sort(Sort::by("TYPE", Direction::Asc))
                .to_query_string(),
            "sort=TYPE"
        );
        assert_eq!(
            QueryOptions::new()
                .sort(Sort::by("TYPE", Direction::Desc))
                .to_query_string(),
            "sort=TYPE,desc"
        );
    }

    #[test]
    fn test_sort_desc_trailing_token() {
        let qs = QueryOptions::new()
            .sort(Sort::desc("DATE").then("NUMBER"))
            .to_query_string();
        assert_eq!(qs, "sort=DATE,NUMBER,desc");
    }

    #[test]
    fn test_count_true_emitted_false_omitted() {
        assert_eq!(QueryOptions::new().count(true).to_query_string(), "count=true");
        assert_eq!(QueryOptions::new().count(false).to_query_string(), "");
    }

    #[test]
    fn test_q_is_url_encoded() {
        let qs = QueryOptions::new().q("AUXIL_CODE like 'test*'").to_query_string();
        assert_eq!(qs, "q=AUXIL_CODE%20like%20%27test%2A%27");
    }

    #[test]
    fn test_extras_after_known_params_in_insertion_order() {
        let qs = QueryOptions::new()
            .limit(5)
            .param("zOption", "b")
            .param("aOption", 1)
            .to_query_string();
        assert_eq!(qs, "limit=5&zOption=b&aOption=1");
    }

    #[test]
    fn test_null_extra_skipped() {
        let qs = QueryOptions::new().param("flag", Value::Null).to_query_string();
        assert_eq!(qs, "");
    }

    #[test]
    fn test_expand_comma_joined() {
        let qs = QueryOptions::new()
            .expand(["TRANSACTIONS", "PAYMENT_LIST"])
            .to_query_string();
        assert_eq!(qs, "expand=TRANSACTIONS,PAYMENT_LIST");
    }
}
