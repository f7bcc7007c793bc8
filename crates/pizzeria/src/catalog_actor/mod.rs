//! # Catalog Actor
//!
//! Owns the pizza catalog: pizzas with their category and ingredient list, keyed by the
//! pizza's unique name.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_framework::ActorEntity) implementation for [`Pizza`]
//! - [`error`] - [`CatalogError`] and its mapping onto framework failures
//! - [`manager`] - [`CatalogManager`], the sqlite-backed repository the actor runs on
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let database = Database::in_memory().await?;
//! let (actor, client) = catalog_actor::new(32);
//! tokio::spawn(actor.run(CatalogManager::new(database)));
//!
//! let margherita = Pizza::new("margherita", 20.5, 520, 320).with_ingredients(["mozzarella", "tomato"]);
//! let response = client.add_pizza(margherita).await?;
//! assert!(response.is_ok());
//! ```

pub mod entity;
pub mod error;
pub mod manager;

pub use error::*;
pub use manager::CatalogManager;

use crate::clients::CatalogClient;
use crate::model::Pizza;
use resource_framework::ResourceActor;

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Pizza>, CatalogClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(client))
}
