//! # Repository Trait
//!
//! A `Repository` is the storage side of a resource actor: it turns one request into reads
//! and writes and reports the outcome. The actor owns exactly one repository and never calls
//! it concurrently, so an implementation may assume each call runs to completion before the
//! next one starts.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use async_trait::async_trait;

/// Storage operations backing a [`ResourceActor`](crate::ResourceActor).
///
/// # Error Granularity
///
/// Each repository defines one error enum for all of its operations. It must convert into
/// [`FrameworkError`] so that expected outcomes (not found, duplicates, invalid input) reach
/// the client as their dedicated variants, while storage faults travel as
/// [`FrameworkError::EntityError`].
#[async_trait]
pub trait Repository<T: ActorEntity>: Send + Sync + 'static {
    /// The error type for every operation of this repository.
    type Error: std::error::Error + Into<FrameworkError> + Send + Sync + 'static;

    /// Persist a new entity and return it as stored.
    async fn create(&self, params: T::Create) -> Result<T, Self::Error>;

    /// Fetch a single entity, `None` when no row matches.
    async fn get(&self, key: &T::Key) -> Result<Option<T>, Self::Error>;

    /// Fetch every entity matching `filter`.
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error>;

    /// Apply a partial update and return the refreshed entity.
    async fn update(&self, key: &T::Key, update: T::Update) -> Result<T, Self::Error>;

    /// Remove an entity.
    async fn delete(&self, key: &T::Key) -> Result<(), Self::Error>;
}
