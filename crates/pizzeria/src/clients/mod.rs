//! Typed clients for the catalog and order actors.
//!
//! Each wraps a [`ResourceClient`](resource_framework::ResourceClient) and answers with an
//! [`ApiResponse`](crate::model::ApiResponse): domain failures come back as `fail` results,
//! while a dead actor or a storage fault is returned as `Err`.

pub mod catalog_client;
pub mod order_client;

pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;
