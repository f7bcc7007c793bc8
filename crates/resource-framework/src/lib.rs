//! # Resource Framework
//!
//! Building blocks for serving persistent resources through actors. Each resource type
//! (a pizza, an order, ...) gets one [`ResourceActor`] that owns a channel receiver and a
//! [`Repository`], and processes requests **one at a time, to completion**. Callers talk to
//! it through a cheap, cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource type and its request payloads
//! 2. **Runtime Layer** ([`ResourceActor`] + [`Repository`]) - sequential request processing
//!    against whatever storage the repository wraps
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Late Binding
//!
//! The repository is handed to [`ResourceActor::run`], not to [`ResourceActor::new`]. A system
//! can therefore create every actor/client pair first and open its storage afterwards:
//!
//! ```rust,ignore
//! let (actor, client) = ResourceActor::<Pizza>::new(32);
//! let handle = tokio::spawn(actor.run(CatalogManager::new(database.clone())));
//!
//! let pizza = client.get("margherita".to_string()).await?;
//! ```
//!
//! ## Errors
//!
//! Every request resolves to `Result<_, FrameworkError>`. Expected business outcomes
//! (not found, conflicts, rejected input) have their own variants so that callers can turn
//! them into data; see [`FrameworkError::is_domain_failure`].
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so client wrappers can
//! be tested without any actor or storage.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod repository;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use repository::Repository;
