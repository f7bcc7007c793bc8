//! Sqlite-backed order repository.

use crate::model::{
    LineItem, NewOrder, Order, OrderFilter, OrderId, OrderUpdateRequest, PizzaId, UserId,
};
use crate::order_actor::{pricing, OrderError};
use crate::storage::schema::{Orders, OrdersPizzas, Pizzas};
use crate::storage::{
    format_timestamp, parse_column, timestamp_column, u32_column, Database, StorageError,
};
use async_trait::async_trait;
use resource_framework::Repository;
use sea_query::{Expr, Order as SortOrder, Query, SimpleExpr, SqliteQueryBuilder};
use sea_query_binder::{SqlxBinder, SqlxValues};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct OrderManager {
    database: Database,
}

impl OrderManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Repository<Order> for OrderManager {
    type Error = OrderError;

    async fn create(&self, new_order: NewOrder) -> Result<Order, OrderError> {
        let NewOrder { user_id, request } = new_order;
        let requested = pricing::aggregate(&request.ordered_items)?;

        let mut tx = self.database.begin().await?;
        if order_exists(&mut tx, request.id).await? {
            return Err(OrderError::DuplicateOrder(request.id));
        }

        let mut items = Vec::with_capacity(requested.len());
        for (pizza_id, amount) in requested {
            let unit_price = current_price(&mut tx, pizza_id)
                .await?
                .ok_or(OrderError::UnknownPizza(pizza_id))?;
            items.push(LineItem {
                pizza_id,
                amount,
                unit_price,
            });
        }

        let order = Order {
            id: request.id,
            user_id,
            city: request.city,
            street: request.street,
            building: request.building,
            delivery_time: request.delivery_time,
            total_price: pricing::total(&items),
            is_delivered: false,
            items,
        };

        let (sql, values) = Query::insert()
            .into_table(Orders::Table)
            .columns([
                Orders::Id,
                Orders::UserId,
                Orders::City,
                Orders::Street,
                Orders::Building,
                Orders::DeliveryTime,
                Orders::TotalPrice,
                Orders::IsDelivered,
            ])
            .values_panic([
                order.id.to_string().into(),
                order.user_id.to_string().into(),
                order.city.as_str().into(),
                order.street.as_str().into(),
                order.building.as_str().into(),
                format_timestamp(&order.delivery_time).into(),
                order.total_price.into(),
                order.is_delivered.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        for (position, item) in order.items.iter().enumerate() {
            let (sql, values) = Query::insert()
                .into_table(OrdersPizzas::Table)
                .columns([
                    OrdersPizzas::OrderId,
                    OrdersPizzas::PizzaId,
                    OrdersPizzas::Quantity,
                    OrdersPizzas::UnitPrice,
                    OrdersPizzas::Position,
                ])
                .values_panic([
                    order.id.to_string().into(),
                    item.pizza_id.to_string().into(),
                    i64::from(item.amount).into(),
                    item.unit_price.into(),
                    (position as i64).into(),
                ])
                .build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        debug!(order_id = %order.id, total = order.total_price, "Order stored");
        Ok(order)
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let mut conn = self.database.acquire().await?;
        Ok(load_order(&mut conn, *id).await?)
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        let mut conn = self.database.acquire().await?;

        let (sql, values) = {
            let mut statement = select_orders();
            statement.and_where(Expr::col(Orders::UserId).eq(filter.user_id.to_string()));
            if filter.active_only {
                statement.and_where(Expr::col(Orders::IsDelivered).eq(false));
            }
            statement
                .order_by(Orders::DeliveryTime, SortOrder::Asc)
                .order_by(Orders::Id, SortOrder::Asc)
                .build_sqlx(SqliteQueryBuilder)
        };
        let rows = sqlx::query_with(&sql, values).fetch_all(&mut *conn).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            orders.push(hydrate(&mut conn, row).await?);
        }
        Ok(orders)
    }

    async fn update(&self, id: &OrderId, update: OrderUpdateRequest) -> Result<Order, OrderError> {
        let mut tx = self.database.begin().await?;
        let current = load_order(&mut tx, *id)
            .await?
            .ok_or(OrderError::NotFound(*id))?;
        if current.is_delivered && update.is_delivered == Some(false) {
            return Err(OrderError::AlreadyDelivered(*id));
        }

        if let Some((sql, values)) = update_statement(*id, update) {
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let order = load_order(&mut tx, *id)
            .await?
            .ok_or(OrderError::NotFound(*id))?;
        tx.commit().await?;
        Ok(order)
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        let mut tx = self.database.begin().await?;
        if !order_exists(&mut tx, *id).await? {
            return Err(OrderError::NotFound(*id));
        }

        let (sql, values) = Query::delete()
            .from_table(OrdersPizzas::Table)
            .and_where(Expr::col(OrdersPizzas::OrderId).eq(id.to_string()))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(Orders::Table)
            .and_where(Expr::col(Orders::Id).eq(id.to_string()))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// `UPDATE` for the supplied fields, or `None` when nothing changes.
fn update_statement(id: OrderId, update: OrderUpdateRequest) -> Option<(String, SqlxValues)> {
    let mut changes: Vec<(Orders, SimpleExpr)> = Vec::new();
    if let Some(city) = update.city {
        changes.push((Orders::City, city.into()));
    }
    if let Some(street) = update.street {
        changes.push((Orders::Street, street.into()));
    }
    if let Some(building) = update.building {
        changes.push((Orders::Building, building.into()));
    }
    if let Some(delivery_time) = update.delivery_time {
        changes.push((Orders::DeliveryTime, format_timestamp(&delivery_time).into()));
    }
    if let Some(is_delivered) = update.is_delivered {
        changes.push((Orders::IsDelivered, is_delivered.into()));
    }
    if changes.is_empty() {
        return None;
    }

    let mut statement = Query::update();
    statement
        .table(Orders::Table)
        .and_where(Expr::col(Orders::Id).eq(id.to_string()));
    for (column, value) in changes {
        statement.value(column, value);
    }
    Some(statement.build_sqlx(SqliteQueryBuilder))
}

fn select_orders() -> sea_query::SelectStatement {
    Query::select()
        .columns([
            Orders::Id,
            Orders::UserId,
            Orders::City,
            Orders::Street,
            Orders::Building,
            Orders::DeliveryTime,
            Orders::TotalPrice,
            Orders::IsDelivered,
        ])
        .from(Orders::Table)
        .to_owned()
}

async fn order_exists(conn: &mut SqliteConnection, id: OrderId) -> Result<bool, StorageError> {
    let (sql, values) = Query::select()
        .column(Orders::Id)
        .from(Orders::Table)
        .and_where(Expr::col(Orders::Id).eq(id.to_string()))
        .build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

/// Catalog price of `pizza_id` right now, `None` when the pizza does not exist.
async fn current_price(
    conn: &mut SqliteConnection,
    pizza_id: PizzaId,
) -> Result<Option<f64>, StorageError> {
    let (sql, values) = Query::select()
        .column(Pizzas::Price)
        .from(Pizzas::Table)
        .and_where(Expr::col(Pizzas::Id).eq(pizza_id.to_string()))
        .build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(|row| row.try_get("price")).transpose()?)
}

async fn load_order(
    conn: &mut SqliteConnection,
    id: OrderId,
) -> Result<Option<Order>, StorageError> {
    let (sql, values) = select_orders()
        .and_where(Expr::col(Orders::Id).eq(id.to_string()))
        .build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, &row).await?)),
        None => Ok(None),
    }
}

/// Turns an order row into an [`Order`], loading its line items in placement order.
async fn hydrate(conn: &mut SqliteConnection, row: &SqliteRow) -> Result<Order, StorageError> {
    let id: OrderId = parse_column(row, "id")?;
    let user_id: UserId = parse_column(row, "user_id")?;

    let (sql, values) = Query::select()
        .columns([
            OrdersPizzas::PizzaId,
            OrdersPizzas::Quantity,
            OrdersPizzas::UnitPrice,
        ])
        .from(OrdersPizzas::Table)
        .and_where(Expr::col(OrdersPizzas::OrderId).eq(id.to_string()))
        .order_by(OrdersPizzas::Position, SortOrder::Asc)
        .build_sqlx(SqliteQueryBuilder);
    let item_rows = sqlx::query_with(&sql, values).fetch_all(&mut *conn).await?;
    let items = item_rows
        .iter()
        .map(|row| -> Result<LineItem, StorageError> {
            Ok(LineItem {
                pizza_id: parse_column(row, "pizza_id")?,
                amount: u32_column(row, "quantity")?,
                unit_price: row.try_get("unit_price")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Order {
        id,
        user_id,
        city: row.try_get("city")?,
        street: row.try_get("street")?,
        building: row.try_get("building")?,
        delivery_time: timestamp_column(row, "delivery_time")?,
        total_price: row.try_get("total_price")?,
        is_delivered: row.try_get("is_delivered")?,
        items,
    })
}
