//! # Pizzeria
//!
//! Order management for a pizza delivery service: a pizza catalog and customer orders, each
//! served by its own resource actor over a shared sqlite database.
//!
//! - **[model]**: Pizzas, orders, request payloads and the [`ApiResponse`](model::ApiResponse) envelope.
//! - **[storage]**: The sqlite [`Database`](storage::Database), schema and row decoding.
//! - **[catalog_actor]** / **[order_actor]**: Repositories the actors run on.
//! - **[clients]**: Typed clients returning `ApiResponse` values.
//! - **[lifecycle]**: [`PizzeriaSystem`](lifecycle::PizzeriaSystem) startup and shutdown.
//! - **[config]**: Settings from `PIZZERIA_*` environment variables.

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod seed;
pub mod storage;
