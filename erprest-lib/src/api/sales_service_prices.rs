//! Sales service prices entity client

use serde_json::Value;

use crate::ErpRestClient;
use crate::error::Error;
use crate::query::Criteria;
use crate::query::FieldMapping;
use crate::query::FieldOps;
use crate::query::QueryOptions;
use crate::response::ListResponse;

use super::entity::EntityClient;

/// Client for the `salesServicePrices` entity collection.
pub struct SalesServicePricesClient<'a> {
    entity: EntityClient<'a>,
}

impl<'a> SalesServicePricesClient<'a> {
    pub(crate) fn new(client: &'a ErpRestClient) -> Self {
        Self {
            entity: EntityClient::new(client, "salesServicePrices", FieldMapping::new()),
        }
    }

    /// Lists service prices.
    pub async fn list(&self, options: &QueryOptions) -> Result<ListResponse, Error> {
        self.entity.list(options).await
    }

    /// Retrieves a service price by internal reference.
    pub async fn get(&self, id: i64, options: &QueryOptions) -> Result<Value, Error> {
        self.entity.get(id, options).await
    }

    /// Creates a service price.
    pub async fn create(&self, record: &Value) -> Result<Value, Error> {
        self.entity.create(record).await
    }

    /// Replaces a service price.
    pub async fn update(&self, id: i64, record: &Value) -> Result<Value, Error> {
        self.entity.update(id, record).await
    }

    /// Deletes a service price.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.entity.delete(id).await
    }

    /// Searches service prices with typed criteria.
    pub async fn search(
        &self,
        criteria: &Criteria,
        options: QueryOptions,
    ) -> Result<ListResponse, Error> {
        self.entity.search(criteria, options).await
    }

    /// Searches service prices whose auxiliary code starts with `code`.
    ///
    /// Equivalent to a manual listing with
    /// `q = "AUXIL_CODE like '<code>*'"`.
    pub async fn search_by_auxil_code(
        &self,
        code: &str,
        options: QueryOptions,
    ) -> Result<ListResponse, Error> {
        self.entity.search(&auxil_code_criteria(code), options).await
    }
}

/// Builds the criteria used by [`SalesServicePricesClient::search_by_auxil_code`].
///
/// Exposed for callers that want the compiled `q` value without issuing
/// a request.
pub fn auxil_code_criteria(code: &str) -> Criteria {
    Criteria::new().ops("auxilCode", FieldOps::new().like(code))
}

#[cfg(test)]
mod tests {
    use crate::query::FieldMapping;

    use super::*;

    #[test]
    fn test_auxil_code_criteria_matches_raw_q() {
        let q = auxil_code_criteria("test")
            .compile(&FieldMapping::new())
            .unwrap();
        assert_eq!(q.as_deref(), Some("AUXIL_CODE like 'test*'"));
    }
}
