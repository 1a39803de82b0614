//! Field name mapping between library-facing and remote schema names.

use std::collections::HashMap;

use crate::error::CriteriaError;

/// Maps library-facing logical field names to the remote schema's
/// physical column names.
///
/// Keys without an explicit entry fall back to an automatic
/// camelCase → UPPER_SNAKE_CASE conversion (`auxilCode` → `AUXIL_CODE`).
/// The conversion is deterministic but not bijective for keys containing
/// digits or consecutive capitals, so irregular remote names need an
/// explicit entry.
///
/// # Example
///
/// ```
/// use erprest_lib::query::FieldMapping;
///
/// let mapping = FieldMapping::new().entry("trCode", "TRCODE");
///
/// assert_eq!(mapping.resolve("trCode").unwrap(), "TRCODE");
/// assert_eq!(mapping.resolve("auxilCode").unwrap(), "AUXIL_CODE");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMapping {
    entries: HashMap<String, String>,
    strict: bool,
}

impl FieldMapping {
    /// Creates an empty mapping that resolves every key through the
    /// automatic conversion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping from a static table of `(logical, remote)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(logical, remote)| ((*logical).to_string(), (*remote).to_string()))
                .collect(),
            strict: false,
        }
    }

    /// Adds an explicit entry for an irregular remote name.
    pub fn entry(mut self, logical: impl Into<String>, remote: impl Into<String>) -> Self {
        self.entries.insert(logical.into(), remote.into());
        self
    }

    /// Disables the automatic fallback: keys without an explicit entry
    /// resolve to [`CriteriaError::UnknownField`].
    ///
    /// Use this for entities with a closed, fully-declared field set.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Resolves a logical field name to its remote column name.
    pub fn resolve(&self, logical: &str) -> Result<String, CriteriaError> {
        if let Some(remote) = self.entries.get(logical) {
            return Ok(remote.clone());
        }
        if self.strict {
            return Err(CriteriaError::unknown_field(logical));
        }
        Ok(to_upper_snake(logical))
    }
}

/// Converts a camelCase identifier to UPPER_SNAKE_CASE.
///
/// An underscore is inserted before every uppercase letter that follows a
/// non-uppercase character, then the whole string is uppercased. Digits
/// pass through unchanged.
pub(crate) fn to_upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}
