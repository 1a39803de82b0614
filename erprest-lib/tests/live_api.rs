//! Integration tests against a live ERP environment.
//!
//! These tests require real service credentials and are ignored by default.
//! To run them, create a `.env` file in the erprest-lib directory with:
//!
//! ```env
//! ERPREST_URL=https://erp.example.com
//! ERPREST_TOKEN=your-access-token
//! ```
//!
//! Then run: `cargo test -p erprest-lib -- --ignored`

use std::env;

use erprest_lib::ErpRestClient;
use erprest_lib::auth::StaticTokenProvider;
use erprest_lib::query::QueryOptions;

fn load_env() -> Option<(String, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("ERPREST_URL").ok()?;
    let token = env::var("ERPREST_TOKEN").ok()?;

    Some((url, token))
}

fn client() -> ErpRestClient {
    let (url, token) = load_env().expect("Missing required environment variables. See module docs.");
    ErpRestClient::builder()
        .url(url)
        .token_provider(StaticTokenProvider::new(token))
        .build()
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_list_gl_slips() {
    let client = client();
    let response = client
        .gl_slips()
        .list(&QueryOptions::new().limit(5).count(true))
        .await
        .expect("listing failed");

    assert!(response.len() <= 5);
    assert!(response.count.is_some());
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_search_by_auxil_code() {
    let client = client();
    let response = client
        .sales_service_prices()
        .search_by_auxil_code("test", QueryOptions::new().limit(10))
        .await
        .expect("search failed");

    assert!(response.len() <= 10);
}
