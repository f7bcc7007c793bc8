//! Entity trait implementation for the Order domain type.

use crate::model::{NewOrder, Order, OrderFilter, OrderId, OrderUpdateRequest};
use resource_framework::ActorEntity;

impl ActorEntity for Order {
    type Key = OrderId;
    type Create = NewOrder;
    type Update = OrderUpdateRequest;
    type Filter = OrderFilter;

    fn key(&self) -> OrderId {
        self.id
    }
}
