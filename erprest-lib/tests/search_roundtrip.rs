//! Round-trip tests for the query layer: criteria compile into a `q`
//! expression, options serialize into a query string, and the path
//! builder assembles the final request path. Everything here is pure
//! and runs without a network.

use erprest_lib::ErpRestClient;
use erprest_lib::api::auxil_code_criteria;
use erprest_lib::auth::StaticTokenProvider;
use erprest_lib::query::{Criteria, FieldMapping, FieldOps, QueryOptions, Sort, build_path};

#[test]
fn criteria_to_path_roundtrip() {
    let criteria = Criteria::new()
        .field("cardType", 1)
        .ops("price", FieldOps::new().gte(100).lte(500));
    let q = criteria.compile(&FieldMapping::new()).unwrap().unwrap();
    assert_eq!(q, "CARD_TYPE eq 1 and (PRICE gte 100 and PRICE lte 500)");

    let path = build_path(
        "salesServicePrices",
        &[],
        Some(&QueryOptions::new().limit(10).offset(0).q(q)),
    );
    assert_eq!(
        path,
        "salesServicePrices?limit=10&offset=0&\
         q=CARD_TYPE%20eq%201%20and%20%28PRICE%20gte%20100%20and%20PRICE%20lte%20500%29"
    );
}

#[test]
fn convenience_wrapper_matches_raw_q() {
    // The search_by_auxil_code wrapper and a manual raw-q listing must
    // produce byte-identical query strings.
    let compiled = auxil_code_criteria("test")
        .compile(&FieldMapping::new())
        .unwrap()
        .unwrap();

    let via_wrapper = QueryOptions::new().q(compiled).to_query_string();
    let via_raw = QueryOptions::new()
        .q("AUXIL_CODE like 'test*'")
        .to_query_string();

    assert_eq!(via_wrapper, via_raw);
}

#[test]
fn full_option_envelope_order() {
    let qs = QueryOptions::new()
        .limit(25)
        .offset(50)
        .fields(["CODE", "NAME"])
        .sort(Sort::desc("DATE"))
        .expand(["TRANSACTIONS"])
        .q("CODE eq 'X'")
        .count(true)
        .param("filterToken", "abc")
        .to_query_string();
    assert_eq!(
        qs,
        "limit=25&offset=50&fields=CODE,NAME&sort=DATE,desc&expand=TRANSACTIONS&\
         q=CODE%20eq%20%27X%27&count=true&filterToken=abc"
    );
}

#[test]
fn dynamic_criteria_match_typed_criteria() {
    let dynamic = Criteria::from_json(&serde_json::json!({
        "code": "TEST",
        "price": { "gte": 100, "lte": 500 },
    }))
    .unwrap();
    let typed = Criteria::new()
        .field("code", "TEST")
        .ops("price", FieldOps::new().gte(100).lte(500));

    let mapping = FieldMapping::new();
    assert_eq!(dynamic.compile(&mapping), typed.compile(&mapping));
}

#[test]
fn entity_client_exposes_endpoint_and_mapping() {
    let client = ErpRestClient::builder()
        .url("https://erp.example.com")
        .token_provider(StaticTokenProvider::new("t"))
        .build();

    let orders = client.entity("purchaseOrders");
    assert_eq!(orders.endpoint(), "purchaseOrders");
    // The default mapping resolves through the automatic conversion
    assert_eq!(orders.mapping().resolve("auxilCode").unwrap(), "AUXIL_CODE");
}

#[test]
fn empty_everything_yields_bare_endpoint() {
    let q = Criteria::new().compile(&FieldMapping::new()).unwrap();
    assert_eq!(q, None);

    let path = build_path("glSlips", &[], Some(&QueryOptions::new()));
    assert_eq!(path, "glSlips");
}
