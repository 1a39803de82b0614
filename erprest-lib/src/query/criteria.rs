//! Search criteria and the filter-expression compiler.

use serde_json::Value;

use crate::error::CriteriaError;

use super::mapping::FieldMapping;

/// A scalar literal usable in a filter clause.
///
/// String literals render single-quoted with internal quotes doubled;
/// numeric and boolean literals render unquoted.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string literal.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A boolean literal.
    Bool(bool),
}

impl Scalar {
    /// Renders this scalar as a filter-expression literal.
    pub(crate) fn to_literal(&self) -> String {
        match self {
            Scalar::Str(s) => escape_string(s),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => {
                // Ensure floats keep a decimal point in the expression
                let s = n.to_string();
                if s.contains('.') || s.contains('e') || s.contains('E') {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
            Scalar::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// A single comparison operator with its operand(s).
#[derive(Debug, Clone, PartialEq)]
enum Op {
    /// Equality: `FIELD eq value`
    Eq(Scalar),
    /// Pattern match with trailing-wildcard default: `FIELD like 'value*'`
    Like(String),
    /// Greater than or equal: `FIELD gte value`
    Gte(Scalar),
    /// Less than or equal: `FIELD lte value`
    Lte(Scalar),
    /// Greater than: `FIELD gt value`
    Gt(Scalar),
    /// Less than: `FIELD lt value`
    Lt(Scalar),
    /// Membership: `(FIELD eq v1 or FIELD eq v2 ...)`
    In(Vec<Scalar>),
    /// Inclusive range: `(FIELD gte lo and FIELD lte hi)`
    Between(Scalar, Scalar),
}

/// An ordered list of operators applied to one field.
///
/// Multiple operators on the same field combine with logical AND, in
/// declaration order.
///
/// # Example
///
/// ```
/// use erprest_lib::query::FieldOps;
///
/// let ops = FieldOps::new().gte(100).lte(500);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOps {
    ops: Vec<Op>,
}

impl FieldOps {
    /// Creates an empty operator list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality operator.
    pub fn eq(mut self, value: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Eq(value.into()));
        self
    }

    /// Adds a pattern-match operator.
    ///
    /// A trailing `*` wildcard is appended at compile time unless the
    /// value already ends with one.
    pub fn like(mut self, value: impl Into<String>) -> Self {
        self.ops.push(Op::Like(value.into()));
        self
    }

    /// Adds a greater-than-or-equal operator.
    pub fn gte(mut self, value: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Gte(value.into()));
        self
    }

    /// Adds a less-than-or-equal operator.
    pub fn lte(mut self, value: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Lte(value.into()));
        self
    }

    /// Adds a greater-than operator.
    pub fn gt(mut self, value: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Gt(value.into()));
        self
    }

    /// Adds a less-than operator.
    pub fn lt(mut self, value: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Lt(value.into()));
        self
    }

    /// Adds a membership operator: the field must equal one of the values.
    ///
    /// An empty value list contributes no sub-clause.
    pub fn one_of<S: Into<Scalar>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.ops
            .push(Op::In(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Adds an inclusive range operator.
    pub fn between(mut self, low: impl Into<Scalar>, high: impl Into<Scalar>) -> Self {
        self.ops.push(Op::Between(low.into(), high.into()));
        self
    }

    fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// The value side of one criteria entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Shorthand for equality against a single value.
    Scalar(Scalar),
    /// Shorthand for a parenthesized OR group of equality clauses.
    OneOf(Vec<Scalar>),
    /// One or more explicit operators.
    Ops(FieldOps),
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(value.into())
    }
}

impl From<Vec<Scalar>> for FieldValue {
    fn from(values: Vec<Scalar>) -> Self {
        FieldValue::OneOf(values)
    }
}

impl From<FieldOps> for FieldValue {
    fn from(ops: FieldOps) -> Self {
        FieldValue::Ops(ops)
    }
}

/// Typed search criteria for one entity.
///
/// Entries keep their insertion order; the compiled filter joins the
/// per-field clauses with ` and ` in that order.
///
/// # Example
///
/// ```
/// use erprest_lib::query::{Criteria, FieldMapping, FieldOps};
///
/// let criteria = Criteria::new()
///     .field("code", "TEST")
///     .ops("price", FieldOps::new().gte(100).lte(500));
///
/// let q = criteria.compile(&FieldMapping::new()).unwrap();
/// assert_eq!(
///     q.as_deref(),
///     Some("CODE eq 'TEST' and (PRICE gte 100 and PRICE lte 500)")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    fields: Vec<(String, FieldValue)>,
}

impl Criteria {
    /// Creates empty criteria.
    ///
    /// Empty criteria compile to `None`, never an empty string, so callers
    /// can cleanly omit the `q` parameter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion for a field.
    ///
    /// Accepts scalars (equality shorthand), `Vec<Scalar>` (OR-group
    /// shorthand) and [`FieldOps`].
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Adds an OR-group criterion: the field must equal one of the values.
    pub fn one_of<S: Into<Scalar>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.field(
            name,
            FieldValue::OneOf(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Adds an operator-spec criterion.
    pub fn ops(self, name: impl Into<String>, ops: FieldOps) -> Self {
        self.field(name, FieldValue::Ops(ops))
    }

    /// Returns `true` if no criteria have been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds criteria from a dynamic JSON object.
    ///
    /// This is the untyped escape hatch for criteria assembled at runtime.
    /// Scalars mean equality, arrays mean an OR group, and nested objects
    /// map operator names (`eq`, `like`, `gte`, `lte`, `gt`, `lt`, `in`,
    /// `between`) to operands. `null` values skip the key entirely.
    ///
    /// # Errors
    ///
    /// Fails fast on unknown operator names, a `between` operand list whose
    /// length is not exactly two, and values that cannot appear in a filter
    /// literal. A silently dropped clause would widen the result set, so
    /// malformed input is never coerced.
    pub fn from_json(value: &Value) -> Result<Self, CriteriaError> {
        let Value::Object(map) = value else {
            return Err(CriteriaError::unsupported(
                "<criteria>",
                "criteria must be a JSON object",
            ));
        };

        let mut criteria = Criteria::new();
        for (key, value) in map {
            match value {
                Value::Null => continue,
                Value::Object(ops) => {
                    let mut field_ops = FieldOps::new();
                    for (op, operand) in ops {
                        field_ops = apply_json_op(field_ops, key, op, operand)?;
                    }
                    criteria = criteria.ops(key.clone(), field_ops);
                }
                Value::Array(values) => {
                    let scalars = values
                        .iter()
                        .map(|v| json_scalar(key, v))
                        .collect::<Result<Vec<_>, _>>()?;
                    criteria = criteria.field(key.clone(), FieldValue::OneOf(scalars));
                }
                other => {
                    criteria = criteria.field(key.clone(), json_scalar(key, other)?);
                }
            }
        }
        Ok(criteria)
    }

    /// Compiles these criteria into a filter expression.
    ///
    /// Field names resolve through `mapping`; per-field clauses join with
    /// ` and ` in insertion order. Returns `Ok(None)` when no clauses were
    /// produced.
    pub fn compile(&self, mapping: &FieldMapping) -> Result<Option<String>, CriteriaError> {
        let mut clauses = Vec::new();
        for (key, value) in &self.fields {
            let field = mapping.resolve(key)?;
            if let Some(clause) = compile_value(&field, value) {
                clauses.push(clause);
            }
        }
        if clauses.is_empty() {
            Ok(None)
        } else {
            Ok(Some(clauses.join(" and ")))
        }
    }
}

/// Compiles one field's value into its clause, if it produces one.
fn compile_value(field: &str, value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Scalar(scalar) => Some(format!("{} eq {}", field, scalar.to_literal())),
        FieldValue::OneOf(values) => compile_or_group(field, values),
        FieldValue::Ops(ops) => {
            if ops.is_empty() {
                return None;
            }
            let subs: Vec<_> = ops.ops.iter().filter_map(|op| compile_op(field, op)).collect();
            match subs.len() {
                0 => None,
                1 => Some(subs.into_iter().next().unwrap_or_default()),
                _ => Some(format!("({})", subs.join(" and "))),
            }
        }
    }
}

/// Compiles a parenthesized OR group of equality clauses.
///
/// An empty value list drops the field rather than erroring.
fn compile_or_group(field: &str, values: &[Scalar]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let parts: Vec<_> = values
        .iter()
        .map(|v| format!("{} eq {}", field, v.to_literal()))
        .collect();
    Some(format!("({})", parts.join(" or ")))
}

fn compile_op(field: &str, op: &Op) -> Option<String> {
    match op {
        Op::Eq(v) => Some(format!("{} eq {}", field, v.to_literal())),
        Op::Like(value) => Some(format!("{} like {}", field, escape_string(&with_wildcard(value)))),
        Op::Gte(v) => Some(format!("{} gte {}", field, v.to_literal())),
        Op::Lte(v) => Some(format!("{} lte {}", field, v.to_literal())),
        Op::Gt(v) => Some(format!("{} gt {}", field, v.to_literal())),
        Op::Lt(v) => Some(format!("{} lt {}", field, v.to_literal())),
        Op::In(values) => compile_or_group(field, values),
        Op::Between(low, high) => Some(format!(
            "({} gte {} and {} lte {})",
            field,
            low.to_literal(),
            field,
            high.to_literal()
        )),
    }
}

/// Appends the trailing `*` wildcard unless the value already ends with one.
fn with_wildcard(value: &str) -> String {
    if value.ends_with('*') {
        value.to_string()
    } else {
        format!("{}*", value)
    }
}

/// Escapes a string for use in a filter expression.
///
/// Strings are enclosed in single quotes, with internal single quotes doubled.
fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn json_scalar(field: &str, value: &Value) -> Result<Scalar, CriteriaError> {
    match value {
        Value::String(s) => Ok(Scalar::Str(s.clone())),
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Scalar::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Scalar::Float(f))
            } else {
                Err(CriteriaError::unsupported(
                    field,
                    format!("number {} does not fit a filter literal", n),
                ))
            }
        }
        other => Err(CriteriaError::unsupported(
            field,
            format!("{} cannot appear in a filter literal", json_type_name(other)),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn apply_json_op(
    ops: FieldOps,
    field: &str,
    op: &str,
    operand: &Value,
) -> Result<FieldOps, CriteriaError> {
    match op {
        "eq" => Ok(ops.eq(json_scalar(field, operand)?)),
        "like" => match operand {
            Value::String(s) => Ok(ops.like(s.clone())),
            other => Err(CriteriaError::unsupported(
                field,
                format!("'like' requires a string operand, got {}", json_type_name(other)),
            )),
        },
        "gte" => Ok(ops.gte(json_scalar(field, operand)?)),
        "lte" => Ok(ops.lte(json_scalar(field, operand)?)),
        "gt" => Ok(ops.gt(json_scalar(field, operand)?)),
        "lt" => Ok(ops.lt(json_scalar(field, operand)?)),
        "in" => match operand {
            Value::Array(values) => {
                let scalars = values
                    .iter()
                    .map(|v| json_scalar(field, v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ops.one_of(scalars))
            }
            other => Err(CriteriaError::unsupported(
                field,
                format!("'in' requires an array operand, got {}", json_type_name(other)),
            )),
        },
        "between" => match operand {
            Value::Array(values) if values.len() == 2 => {
                let low = json_scalar(field, &values[0])?;
                let high = json_scalar(field, &values[1])?;
                Ok(ops.between(low, high))
            }
            Value::Array(values) => Err(CriteriaError::between_arity(field, values.len())),
            other => Err(CriteriaError::unsupported(
                field,
                format!(
                    "'between' requires a two-element array, got {}",
                    json_type_name(other)
                ),
            )),
        },
        unknown => Err(CriteriaError::unknown_operator(field, unknown)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn compile(criteria: Criteria) -> Option<String> {
        criteria.compile(&FieldMapping::new()).unwrap()
    }

    #[test]
    fn test_scalar_equality() {
        let q = compile(Criteria::new().field("code", "TEST").field("active", true));
        assert_eq!(q.as_deref(), Some("CODE eq 'TEST' and ACTIVE eq true"));
    }

    #[test]
    fn test_numeric_literals_unquoted() {
        let q = compile(Criteria::new().field("cardType", 1).field("rate", 2.5));
        assert_eq!(q.as_deref(), Some("CARD_TYPE eq 1 and RATE eq 2.5"));
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        let q = compile(Criteria::new().field("rate", 2.0));
        assert_eq!(q.as_deref(), Some("RATE eq 2.0"));
    }

    #[test]
    fn test_empty_criteria_compile_to_none() {
        assert_eq!(compile(Criteria::new()), None);
    }

    #[test]
    fn test_array_shorthand_is_or_group() {
        let q = compile(Criteria::new().one_of("tags", ["A", "B"]));
        assert_eq!(q.as_deref(), Some("(TAGS eq 'A' or TAGS eq 'B')"));
    }

    #[test]
    fn test_empty_array_drops_field() {
        let q = compile(
            Criteria::new()
                .one_of("tags", Vec::<Scalar>::new())
                .field("code", "X"),
        );
        assert_eq!(q.as_deref(), Some("CODE eq 'X'"));
    }

    #[test]
    fn test_operator_group_parenthesized() {
        let q = compile(Criteria::new().ops("price", FieldOps::new().gte(100).lte(500)));
        assert_eq!(q.as_deref(), Some("(PRICE gte 100 and PRICE lte 500)"));
    }

    #[test]
    fn test_single_operator_unparenthesized() {
        let q = compile(Criteria::new().ops("price", FieldOps::new().gte(100)));
        assert_eq!(q.as_deref(), Some("PRICE gte 100"));
    }

    #[test]
    fn test_operator_declaration_order_preserved() {
        let q = compile(Criteria::new().ops("price", FieldOps::new().lte(500).gte(100)));
        assert_eq!(q.as_deref(), Some("(PRICE lte 500 and PRICE gte 100)"));
    }

    #[test]
    fn test_like_appends_wildcard() {
        let q = compile(Criteria::new().ops("auxilCode", FieldOps::new().like("test")));
        assert_eq!(q.as_deref(), Some("AUXIL_CODE like 'test*'"));
    }

    #[test]
    fn test_like_keeps_existing_wildcard() {
        let q = compile(Criteria::new().ops("auxilCode", FieldOps::new().like("test*")));
        assert_eq!(q.as_deref(), Some("AUXIL_CODE like 'test*'"));
    }

    #[test]
    fn test_between_compiles_to_bounds_pair() {
        let q = compile(Criteria::new().ops("date", FieldOps::new().between(20240101, 20241231)));
        assert_eq!(q.as_deref(), Some("(DATE gte 20240101 and DATE lte 20241231)"));
    }

    #[test]
    fn test_in_matches_array_shorthand() {
        let via_ops = compile(Criteria::new().ops("tags", FieldOps::new().one_of(["A", "B"])));
        let via_array = compile(Criteria::new().one_of("tags", ["A", "B"]));
        assert_eq!(via_ops, via_array);
    }

    #[test]
    fn test_quote_escaping() {
        let q = compile(Criteria::new().field("name", "O'Brien"));
        assert_eq!(q.as_deref(), Some("NAME eq 'O''Brien'"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let criteria = Criteria::new()
            .field("code", "X")
            .ops("price", FieldOps::new().gte(100).lte(500));
        assert_eq!(compile(criteria.clone()), compile(criteria));
    }

    #[test]
    fn test_from_json_scalars_and_ops() {
        let criteria = Criteria::from_json(&json!({
            "code": "TEST",
            "price": { "gte": 100, "lte": 500 },
            "tags": ["A", "B"],
        }))
        .unwrap();
        let q = compile(criteria);
        assert_eq!(
            q.as_deref(),
            Some(
                "CODE eq 'TEST' and (PRICE gte 100 and PRICE lte 500) \
                 and (TAGS eq 'A' or TAGS eq 'B')"
            )
        );
    }

    #[test]
    fn test_from_json_null_skips_key() {
        let criteria = Criteria::from_json(&json!({ "code": null, "name": "X" })).unwrap();
        assert_eq!(compile(criteria).as_deref(), Some("NAME eq 'X'"));
    }

    #[test]
    fn test_from_json_unknown_operator_fails() {
        let err = Criteria::from_json(&json!({ "price": { "gte": 1, "almost": 2 } })).unwrap_err();
        assert!(matches!(err, CriteriaError::UnknownOperator { .. }));
    }

    #[test]
    fn test_from_json_between_arity_fails() {
        let err = Criteria::from_json(&json!({ "date": { "between": [1, 2, 3] } })).unwrap_err();
        assert!(matches!(err, CriteriaError::BetweenArity { len: 3, .. }));
    }
}
