//! Order request validation and totals.

use crate::model::{LineItem, OrderedItem, PizzaId};
use crate::order_actor::OrderError;

/// Merges requested items by pizza, summing the amounts of repeated ids.
///
/// Pizzas keep the position of their first appearance. An empty request or a zero amount is
/// rejected.
pub fn aggregate(items: &[OrderedItem]) -> Result<Vec<(PizzaId, u32)>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::InvalidItems("Order has no items".to_string()));
    }

    let mut merged: Vec<(PizzaId, u32)> = Vec::with_capacity(items.len());
    for item in items {
        if item.amount == 0 {
            return Err(OrderError::InvalidItems(format!(
                "Amount of pizza {} must be positive",
                item.id
            )));
        }
        match merged.iter_mut().find(|(id, _)| *id == item.id) {
            Some((_, amount)) => {
                *amount = amount.checked_add(item.amount).ok_or_else(|| {
                    OrderError::InvalidItems(format!("Amount of pizza {} is too large", item.id))
                })?;
            }
            None => merged.push((item.id, item.amount)),
        }
    }
    Ok(merged)
}

/// Sum of price times amount over all lines.
pub fn total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::subtotal).sum()
}
