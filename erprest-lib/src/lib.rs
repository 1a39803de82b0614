//! ERP REST API client library
//!
//! A Rust async client library for an OData-style ERP entity Web API.
//! The query layer (criteria compiler, query-string serializer, field
//! mapping, path building) is pure and usable without a client; the
//! entity clients layer CRUD and search on top of a shared transport.

pub mod api;
pub mod auth;
pub mod error;
pub mod query;
pub mod response;

mod client;

pub use client::*;
pub use response::ListResponse;
