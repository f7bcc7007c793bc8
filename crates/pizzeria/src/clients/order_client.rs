//! # Order Client
//!
//! High-level API for the order actor.

use crate::model::{
    ApiResponse, NewOrder, Order, OrderAddRequest, OrderFilter, OrderId, OrderUpdateRequest,
    UserId,
};
use crate::order_actor::{OrderError, NO_ACTIVE_ORDERS, NO_SUCH_ORDER};
use async_trait::async_trait;
use resource_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Undelivered orders of `user_id`.
    ///
    /// When there are none the response is `ok` with the detail "No active orders" and no
    /// payload, rather than an empty list.
    #[instrument(skip(self))]
    pub async fn get_active_orders(
        &self,
        user_id: UserId,
    ) -> Result<ApiResponse<Vec<Order>>, OrderError> {
        let orders = ActorClient::list(self, OrderFilter::active(user_id)).await?;
        if orders.is_empty() {
            return Ok(ApiResponse::notice(NO_ACTIVE_ORDERS));
        }
        Ok(ApiResponse::ok(orders))
    }

    /// Every order of `user_id`, possibly none.
    #[instrument(skip(self))]
    pub async fn get_all_orders(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        ActorClient::list(self, OrderFilter::all(user_id)).await
    }

    /// Places an order, pricing every line at the pizza's current catalog price.
    #[instrument(skip(self, request), fields(order_id = %request.id))]
    pub async fn add_order(
        &self,
        request: OrderAddRequest,
        user_id: UserId,
    ) -> Result<ApiResponse<Order>, OrderError> {
        debug!("Sending request");
        let response = respond(self.inner.create(NewOrder { user_id, request }).await)?;
        if let Some(order) = response.payload() {
            info!(total = order.total_price, lines = order.items.len(), "Order placed");
        }
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdateRequest,
    ) -> Result<ApiResponse<Order>, OrderError> {
        debug!("Sending request");
        respond(self.inner.update(id, update).await)
    }
}

fn respond<T>(outcome: Result<T, FrameworkError>) -> Result<ApiResponse<T>, OrderError> {
    match outcome {
        Ok(value) => Ok(ApiResponse::ok(value)),
        Err(FrameworkError::NotFound(_)) => Ok(ApiResponse::fail(NO_SUCH_ORDER)),
        Err(FrameworkError::Conflict(detail)) | Err(FrameworkError::Rejected(detail)) => {
            Ok(ApiResponse::fail(detail))
        }
        Err(e) => Err(e.into()),
    }
}
