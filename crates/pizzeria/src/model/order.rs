//! Customer orders.
//!
//! An order is placed for a user with a delivery address, a delivery time and a list of
//! requested pizzas. The order actor turns the request into [`LineItem`]s, snapshotting each
//! pizza's price, and fixes `total_price` at placement. Later catalog price changes never
//! touch existing orders.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](resource_framework::ActorEntity) in
//! [`order_actor`](crate::order_actor) with [`NewOrder`] as creation payload,
//! [`OrderUpdateRequest`] as update payload and [`OrderFilter`] for listing.

use crate::model::{OrderId, PizzaId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One requested pizza and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub id: PizzaId,
    pub amount: u32,
}

/// Request body for placing an order.
///
/// `id` is generated when the caller does not supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAddRequest {
    #[serde(default = "OrderId::generate")]
    pub id: OrderId,
    pub city: String,
    pub street: String,
    pub building: String,
    pub delivery_time: DateTime<Utc>,
    pub ordered_items: Vec<OrderedItem>,
}

/// Creation payload: an [`OrderAddRequest`] placed on behalf of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub request: OrderAddRequest,
}

/// A pizza within a placed order, with the unit price it was sold at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub pizza_id: PizzaId,
    pub amount: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Active => write!(f, "active"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub city: String,
    pub street: String,
    pub building: String,
    pub delivery_time: DateTime<Utc>,
    pub total_price: f64,
    pub is_delivered: bool,
    pub items: Vec<LineItem>,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        if self.is_delivered {
            OrderStatus::Delivered
        } else {
            OrderStatus::Active
        }
    }

    /// Quantity of `pizza_id` in this order, 0 when absent.
    pub fn amount_of(&self, pizza_id: PizzaId) -> u32 {
        self.items
            .iter()
            .filter(|item| item.pizza_id == pizza_id)
            .map(|item| item.amount)
            .sum()
    }
}

/// Partial update of an order's delivery details.
///
/// Line items and the total are fixed at placement and cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_delivered: Option<bool>,
}

impl OrderUpdateRequest {
    /// Marks the order as delivered and changes nothing else.
    pub fn delivered() -> Self {
        Self {
            is_delivered: Some(true),
            ..Default::default()
        }
    }
}

/// Which orders of a user to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub user_id: UserId,
    pub active_only: bool,
}

impl OrderFilter {
    /// Orders of `user_id` that are not delivered yet.
    pub fn active(user_id: UserId) -> Self {
        Self {
            user_id,
            active_only: true,
        }
    }

    /// Every order of `user_id`, delivered or not.
    pub fn all(user_id: UserId) -> Self {
        Self {
            user_id,
            active_only: false,
        }
    }
}
