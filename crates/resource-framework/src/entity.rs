//! # ActorEntity Trait
//!
//! The `ActorEntity` trait describes a resource served by a [`ResourceActor`](crate::ResourceActor):
//! the key it is looked up by and the payloads used to create, update and list it. The
//! behaviour lives in a [`Repository`](crate::Repository); the entity itself stays a plain
//! data type.
//!
//! We use associated types so that a `Pizza` actor only accepts pizza payloads. Sending an
//! order update to the catalog does not compile.

use std::fmt::{Debug, Display};

/// Trait that any resource must implement to be served by a `ResourceActor`.
pub trait ActorEntity: Clone + Send + Sync + Debug + 'static {
    /// The key a single entity is addressed by (a name, a UUID, ...).
    type Key: PartialEq + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Selection criteria for listing entities. Use `()` for "everything".
    type Filter: Send + Sync + Debug;

    /// The key this entity can be fetched by after it has been written.
    fn key(&self) -> Self::Key;
}
