//! # System Lifecycle
//!
//! [`PizzeriaSystem`] wires the pizzeria together: it opens the database, spawns the catalog
//! and order actors on top of it and hands out their clients.
//!
//! ## Late binding
//!
//! Actors are created without their storage. The repository is injected when the actor task
//! starts, so tests can run either manager against any [`Database`](crate::storage::Database):
//!
//! ```rust,ignore
//! let (catalog_actor, catalog_client) = catalog_actor::new(capacity);
//! let (order_actor, order_client) = order_actor::new(capacity);
//!
//! let catalog = tokio::spawn(catalog_actor.run(CatalogManager::new(database.clone())));
//! let orders = tokio::spawn(order_actor.run(OrderManager::new(database.clone())));
//! ```
//!
//! The order actor reads pizza prices from the shared database instead of asking the catalog
//! actor, so the two actors have no dependency on each other.
//!
//! ## Graceful shutdown
//!
//! 1. **Drop all clients** - closes the sender side of both channels
//! 2. **Actors drain** - each actor answers what is still queued, then `recv()` returns `None`
//! 3. **Await completion** - both tasks are joined; a panicked actor is reported
//! 4. **Close the pool** - pending connections are released
//!
//! Clones of a client held elsewhere keep their actor alive, so `shutdown` only returns once
//! those are gone too.

pub mod pizzeria_system;

pub use pizzeria_system::*;
