//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the CRUD operations of a [`Repository`](crate::Repository), plus
/// `List` for filtered reads. Each request carries its own response channel, and the payload
/// types come from the [`ActorEntity`] so a request can only reach the actor it was built for.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        key: T::Key,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        key: T::Key,
        respond_to: Response<()>,
    },
}
