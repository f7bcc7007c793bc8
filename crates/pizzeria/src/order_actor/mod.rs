//! # Order Actor
//!
//! Places and tracks customer orders.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] and its mapping onto framework failures
//! - [`pricing`] - request validation, line aggregation and totals
//! - [`manager`] - [`OrderManager`], the sqlite-backed repository the actor runs on
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Placing an order
//!
//! The order actor reads pizza prices straight from the shared database, inside the same
//! transaction that writes the order. Prices are copied onto the line items, so the order
//! total never moves once placed.
//!
//! ```rust,ignore
//! let (actor, client) = order_actor::new(32);
//! tokio::spawn(actor.run(OrderManager::new(database)));
//!
//! let placed = client.add_order(request, user_id).await?;
//! let active = client.get_active_orders(user_id).await?;
//! ```

pub mod entity;
pub mod error;
pub mod manager;
pub mod pricing;

pub use error::*;
pub use manager::OrderManager;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_framework::ResourceActor;

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(client))
}
