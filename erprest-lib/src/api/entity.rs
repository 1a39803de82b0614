//! Generic entity client
//!
//! One parameterized client covers the CRUD and search surface that every
//! entity collection shares; the typed clients in this module's siblings
//! are thin wrappers over it. All request paths go through
//! [`build_path`], so the path contract lives in exactly one place.

use reqwest::Method;
use serde_json::Value;

use crate::ErpRestClient;
use crate::error::Error;
use crate::query::Criteria;
use crate::query::FieldMapping;
use crate::query::QueryOptions;
use crate::query::build_path;
use crate::response::ListResponse;

/// Generic client for one entity collection.
///
/// # Example
///
/// ```ignore
/// let items = client.entity("purchaseOrders")
///     .list(&QueryOptions::new().limit(10))
///     .await?;
/// ```
pub struct EntityClient<'a> {
    client: &'a ErpRestClient,
    endpoint: &'static str,
    mapping: FieldMapping,
}

impl<'a> EntityClient<'a> {
    pub(crate) fn new(
        client: &'a ErpRestClient,
        endpoint: &'static str,
        mapping: FieldMapping,
    ) -> Self {
        Self {
            client,
            endpoint,
            mapping,
        }
    }

    /// Returns the endpoint this client operates on.
    pub fn endpoint(&self) -> &str {
        self.endpoint
    }

    /// Returns the field mapping used to compile search criteria.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Lists records with the given options.
    pub async fn list(&self, options: &QueryOptions) -> Result<ListResponse, Error> {
        let path = build_path(self.endpoint, &[], Some(options));
        self.client.request_json(Method::GET, &path, None).await
    }

    /// Retrieves a single record by id.
    pub async fn get(&self, id: i64, options: &QueryOptions) -> Result<Value, Error> {
        let path = build_path(self.endpoint, &[id.into()], Some(options));
        self.client.request_json(Method::GET, &path, None).await
    }

    /// Creates a record and returns the created representation.
    pub async fn create(&self, record: &Value) -> Result<Value, Error> {
        let path = build_path(self.endpoint, &[], None);
        self.client
            .request_json(Method::POST, &path, Some(record))
            .await
    }

    /// Replaces a record by id and returns the updated representation.
    pub async fn update(&self, id: i64, record: &Value) -> Result<Value, Error> {
        let path = build_path(self.endpoint, &[id.into()], None);
        self.client
            .request_json(Method::PUT, &path, Some(record))
            .await
    }

    /// Deletes a record by id.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let path = build_path(self.endpoint, &[id.into()], None);
        self.client.request_empty(Method::DELETE, &path, None).await
    }

    /// Searches records: compiles `criteria` into the `q` parameter and
    /// lists with the combined options.
    ///
    /// Empty criteria compile to no `q` parameter at all, so this behaves
    /// exactly like [`list`](Self::list) in that case.
    pub async fn search(
        &self,
        criteria: &Criteria,
        options: QueryOptions,
    ) -> Result<ListResponse, Error> {
        let options = match criteria.compile(&self.mapping)? {
            Some(q) => options.q(q),
            None => options,
        };
        self.list(&options).await
    }
}
