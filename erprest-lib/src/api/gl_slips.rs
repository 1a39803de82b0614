//! GL slips entity client

use serde_json::Value;

use crate::ErpRestClient;
use crate::error::Error;
use crate::query::Criteria;
use crate::query::FieldMapping;
use crate::query::QueryOptions;
use crate::response::ListResponse;

use super::entity::EntityClient;

/// Client for the `glSlips` entity collection (general ledger slips).
///
/// # Example
///
/// ```ignore
/// use erprest_lib::query::{Criteria, FieldOps, QueryOptions, Sort};
///
/// let slips = client.gl_slips()
///     .search(
///         &Criteria::new().ops("date", FieldOps::new().between(20240101, 20241231)),
///         QueryOptions::new().sort(Sort::desc("DATE")).limit(50),
///     )
///     .await?;
/// ```
pub struct GlSlipsClient<'a> {
    entity: EntityClient<'a>,
}

impl<'a> GlSlipsClient<'a> {
    pub(crate) fn new(client: &'a ErpRestClient) -> Self {
        // TRCODE has no underscore in the remote schema
        let mapping = FieldMapping::new().entry("trCode", "TRCODE");
        Self {
            entity: EntityClient::new(client, "glSlips", mapping),
        }
    }

    /// Lists GL slips.
    pub async fn list(&self, options: &QueryOptions) -> Result<ListResponse, Error> {
        self.entity.list(options).await
    }

    /// Retrieves a GL slip by internal reference.
    pub async fn get(&self, id: i64, options: &QueryOptions) -> Result<Value, Error> {
        self.entity.get(id, options).await
    }

    /// Creates a GL slip.
    pub async fn create(&self, record: &Value) -> Result<Value, Error> {
        self.entity.create(record).await
    }

    /// Replaces a GL slip.
    pub async fn update(&self, id: i64, record: &Value) -> Result<Value, Error> {
        self.entity.update(id, record).await
    }

    /// Deletes a GL slip.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.entity.delete(id).await
    }

    /// Searches GL slips with typed criteria.
    pub async fn search(
        &self,
        criteria: &Criteria,
        options: QueryOptions,
    ) -> Result<ListResponse, Error> {
        self.entity.search(criteria, options).await
    }
}
