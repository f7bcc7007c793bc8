//! Error types for the Order actor.

use crate::model::{OrderId, PizzaId};
use crate::storage::StorageError;
use resource_framework::FrameworkError;
use thiserror::Error;

pub const NO_SUCH_ORDER: &str = "No such order";
pub const DUPLICATE_ORDER: &str = "order with such id already exists";
pub const NO_ACTIVE_ORDERS: &str = "No active orders";
pub const ORDER_DELIVERED: &str = "Order already delivered";

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// An order with the requested id was placed before.
    #[error("Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The order names a pizza that is not in the catalog.
    #[error("No such pizza: {0}")]
    UnknownPizza(PizzaId),

    /// The order is delivered and cannot become active again.
    #[error("Order already delivered: {0}")]
    AlreadyDelivered(OrderId),

    /// The item list is empty or has a zero amount.
    #[error("{0}")]
    InvalidItems(String),

    /// An underlying database error occurred.
    #[error("Order storage error: {0}")]
    Storage(#[from] StorageError),

    /// The repository failed with an error of another type.
    #[error("Order repository error: {0}")]
    Repository(Box<dyn std::error::Error + Send + Sync>),

    /// The actor is gone or dropped the reply.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        OrderError::Storage(e.into())
    }
}

/// Recovers the repository's own error from an entity error.
impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<OrderError>() {
                Ok(inner) => *inner,
                Err(source) => OrderError::Repository(source),
            },
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                OrderError::ActorCommunicationError(e.to_string())
            }
            FrameworkError::Rejected(detail) => OrderError::InvalidItems(detail),
            other => OrderError::Repository(Box::new(other)),
        }
    }
}

impl From<OrderError> for FrameworkError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => FrameworkError::NotFound(id.to_string()),
            OrderError::DuplicateOrder(_) => FrameworkError::Conflict(DUPLICATE_ORDER.to_string()),
            OrderError::AlreadyDelivered(_) => FrameworkError::Rejected(ORDER_DELIVERED.to_string()),
            e @ (OrderError::UnknownPizza(_) | OrderError::InvalidItems(_)) => {
                FrameworkError::Rejected(e.to_string())
            }
            other => FrameworkError::EntityError(Box::new(other)),
        }
    }
}
