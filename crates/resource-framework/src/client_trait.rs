//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get` and `list`
//! methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the plain read operations.
///
/// Implementors only provide access to the inner client and an error mapping:
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Pizza> for CatalogClient {
///     type Error = CatalogError;
///
///     fn inner(&self) -> &ResourceClient<Pizza> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CatalogError::from(e)
///     }
/// }
///
/// // get() and list() are provided automatically
/// let everything = catalog_client.list(()).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(key).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}
