//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the "server" half of a resource. It owns the
//! receiving end of the request channel and processes messages sequentially against the
//! repository it was started with.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::message::ResourceRequest;
use crate::repository::Repository;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that serves one resource type.
///
/// **Concurrency Model**:
/// Every request is handled to completion before the next one is taken off the channel, so
/// a repository never sees two calls at once. Several actors (one per resource type) run in
/// parallel in their own Tokio tasks.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass the repository into `actor.run(repository)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Order>::new(32);
/// tokio::spawn(actor.run(OrderManager::new(database)));
/// ```
///
/// The loop ends when every client has been dropped.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run<R>(mut self, repository: R)
    where
        R: Repository<T>,
    {
        // Extract just the type name (e.g., "Pizza" instead of "pizzeria::model::pizza::Pizza")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = repository.create(params).await;
                    match &result {
                        Ok(item) => info!(entity_type, key = %item.key(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::Get { key, respond_to } => {
                    let result = repository.get(&key).await;
                    match &result {
                        Ok(item) => debug!(entity_type, %key, found = item.is_some(), "Get"),
                        Err(e) => warn!(entity_type, %key, error = %e, "Get failed"),
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::List { filter, respond_to } => {
                    debug!(entity_type, ?filter, "List");
                    let result = repository.list(filter).await;
                    match &result {
                        Ok(items) => debug!(entity_type, count = items.len(), "Listed"),
                        Err(e) => warn!(entity_type, error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::Update {
                    key,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %key, ?update, "Update");
                    let result = repository.update(&key, update).await;
                    match &result {
                        Ok(_) => info!(entity_type, %key, "Updated"),
                        Err(e) => warn!(entity_type, %key, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
                ResourceRequest::Delete { key, respond_to } => {
                    debug!(entity_type, %key, "Delete");
                    let result = repository.delete(&key).await;
                    match &result {
                        Ok(()) => info!(entity_type, %key, "Deleted"),
                        Err(e) => warn!(entity_type, %key, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result.map_err(Into::into));
                }
            }
        }

        info!(entity_type, handled, "Shutdown");
    }
}
