use chrono::{DateTime, TimeZone, Utc};
use pizzeria::lifecycle::PizzeriaSystem;
use pizzeria::model::{
    ApiResponse, Order, OrderAddRequest, OrderId, OrderUpdateRequest, OrderedItem, Pizza,
    PizzaId, PizzaUpdateRequest, UserId,
};
use pizzeria::order_actor::{
    OrderError, OrderManager, DUPLICATE_ORDER, NO_ACTIVE_ORDERS, NO_SUCH_ORDER, ORDER_DELIVERED,
};
use pizzeria::storage::Database;
use resource_framework::Repository;

async fn start() -> PizzeriaSystem {
    let database = Database::in_memory().await.expect("in-memory database");
    PizzeriaSystem::with_database(database, 16)
}

async fn add(system: &PizzeriaSystem, pizza: Pizza) -> PizzaId {
    system
        .catalog_client
        .add_pizza(pizza)
        .await
        .unwrap()
        .into_payload()
        .expect("pizza added")
        .id
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, hour, 0, 0).unwrap()
}

fn request(items: &[(PizzaId, u32)]) -> OrderAddRequest {
    OrderAddRequest {
        id: OrderId::generate(),
        city: "Moscow".into(),
        street: "Arbat".into(),
        building: "12".into(),
        delivery_time: at(19),
        ordered_items: items
            .iter()
            .map(|&(id, amount)| OrderedItem { id, amount })
            .collect(),
    }
}

async fn place(system: &PizzeriaSystem, request: OrderAddRequest, user: UserId) -> Order {
    system
        .order_client
        .add_order(request, user)
        .await
        .unwrap()
        .into_payload()
        .expect("order placed")
}

async fn count(database: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(database.pool())
        .await
        .expect("count query")
}

#[tokio::test]
async fn test_total_is_price_times_quantity() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let pepperoni = add(&system, Pizza::new("pepperoni", 24.0, 610, 350)).await;
    let user = UserId::generate();

    let order = place(&system, request(&[(margherita, 2), (pepperoni, 1)]), user).await;

    assert_eq!(order.total_price, 65.0);
    assert!(!order.is_delivered);
    assert_eq!(order.user_id, user);
    assert_eq!(order.amount_of(margherita), 2);
    assert_eq!(order.items[1].unit_price, 24.0);

    let quantity: i64 = sqlx::query_scalar(
        "SELECT quantity FROM orders_pizzas WHERE order_id = ? AND pizza_id = ?",
    )
    .bind(order.id.to_string())
    .bind(margherita.to_string())
    .fetch_one(system.database().pool())
    .await
    .unwrap();
    assert_eq!(quantity, 2);
}

#[tokio::test]
async fn test_later_price_changes_do_not_touch_placed_orders() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();
    let order = place(&system, request(&[(margherita, 2)]), user).await;

    let repriced = PizzaUpdateRequest {
        price: Some(30.0),
        ..Default::default()
    };
    assert!(system
        .catalog_client
        .update_pizza("margherita", repriced)
        .await
        .unwrap()
        .is_ok());

    let orders = system.order_client.get_all_orders(user).await.unwrap();
    assert_eq!(orders, vec![order.clone()]);
    assert_eq!(orders[0].total_price, 41.0);
    assert_eq!(orders[0].items[0].unit_price, 20.5);

    let next = place(&system, request(&[(margherita, 2)]), user).await;
    assert_eq!(next.total_price, 60.0);
}

#[tokio::test]
async fn test_repeated_pizza_ids_are_aggregated() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;

    let order = place(
        &system,
        request(&[(margherita, 1), (margherita, 2)]),
        UserId::generate(),
    )
    .await;

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].amount, 3);
    assert_eq!(order.total_price, 61.5);
}

#[tokio::test]
async fn test_pizzas_with_equal_prices_are_all_counted() {
    let system = start().await;
    let marinara = add(&system, Pizza::new("marinara", 15.0, 410, 300)).await;
    let funghi = add(&system, Pizza::new("funghi", 15.0, 450, 310)).await;

    let order = place(
        &system,
        request(&[(marinara, 1), (funghi, 1)]),
        UserId::generate(),
    )
    .await;
    assert_eq!(order.total_price, 30.0);
    assert_eq!(order.items.len(), 2);
}

#[tokio::test]
async fn test_unknown_pizza_rejects_the_whole_order() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let ghost = PizzaId::generate();

    let response = system
        .order_client
        .add_order(request(&[(margherita, 1), (ghost, 1)]), UserId::generate())
        .await
        .unwrap();

    assert_eq!(response, ApiResponse::fail(format!("No such pizza: {ghost}")));
    assert_eq!(count(system.database(), "orders").await, 0);
    assert_eq!(count(system.database(), "orders_pizzas").await, 0);
}

#[tokio::test]
async fn test_empty_and_zero_amount_orders_are_rejected() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();

    let empty = system.order_client.add_order(request(&[]), user).await.unwrap();
    assert!(empty.is_fail());

    let zero = system
        .order_client
        .add_order(request(&[(margherita, 0)]), user)
        .await
        .unwrap();
    assert!(zero.is_fail());
    assert!(zero.detail().unwrap().contains("positive"));

    assert_eq!(count(system.database(), "orders").await, 0);
}

#[tokio::test]
async fn test_duplicate_order_id_is_a_fail_result() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();
    let first = request(&[(margherita, 1)]);
    let again = OrderAddRequest {
        ordered_items: vec![OrderedItem {
            id: margherita,
            amount: 5,
        }],
        ..first.clone()
    };

    place(&system, first, user).await;
    let response = system.order_client.add_order(again, user).await.unwrap();

    assert_eq!(response, ApiResponse::fail(DUPLICATE_ORDER));
    let orders = system.order_client.get_all_orders(user).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total_price, 20.5);
}

#[tokio::test]
async fn test_active_and_all_listings() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();
    let neighbour = UserId::generate();

    assert!(system.order_client.get_all_orders(user).await.unwrap().is_empty());
    assert_eq!(
        system.order_client.get_active_orders(user).await.unwrap(),
        ApiResponse::notice(NO_ACTIVE_ORDERS)
    );

    let mut late = request(&[(margherita, 1)]);
    late.delivery_time = at(21);
    let late = place(&system, late, user).await;
    let early = place(&system, request(&[(margherita, 2)]), user).await;
    place(&system, request(&[(margherita, 1)]), neighbour).await;

    let active = system
        .order_client
        .get_active_orders(user)
        .await
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(active, vec![early.clone(), late.clone()]);

    system
        .order_client
        .update_order(early.id, OrderUpdateRequest::delivered())
        .await
        .unwrap();

    let active = system
        .order_client
        .get_active_orders(user)
        .await
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(active, vec![late]);
    assert_eq!(system.order_client.get_all_orders(user).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_partial_order_update() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let order = place(&system, request(&[(margherita, 2)]), UserId::generate()).await;

    let update = OrderUpdateRequest {
        street: Some("Tverskaya".into()),
        delivery_time: Some(at(20)),
        ..Default::default()
    };
    let updated = system
        .order_client
        .update_order(order.id, update)
        .await
        .unwrap()
        .into_payload()
        .unwrap();

    assert_eq!(
        updated,
        Order {
            street: "Tverskaya".into(),
            delivery_time: at(20),
            ..order
        }
    );
}

#[tokio::test]
async fn test_delivered_order_cannot_be_reopened() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();
    let order = place(&system, request(&[(margherita, 2)]), user).await;
    system
        .order_client
        .update_order(order.id, OrderUpdateRequest::delivered())
        .await
        .unwrap();

    let reopen = OrderUpdateRequest {
        city: Some("Kazan".into()),
        is_delivered: Some(false),
        ..Default::default()
    };
    let response = system
        .order_client
        .update_order(order.id, reopen)
        .await
        .unwrap();
    assert_eq!(response, ApiResponse::fail(ORDER_DELIVERED));

    let active = system.order_client.get_active_orders(user).await.unwrap();
    assert_eq!(active.detail(), Some(NO_ACTIVE_ORDERS));
    let stored = system.order_client.get_all_orders(user).await.unwrap();
    assert_eq!(stored[0].city, "Moscow");
    assert!(stored[0].is_delivered);

    // Delivering again is harmless
    let again = system
        .order_client
        .update_order(order.id, OrderUpdateRequest::delivered())
        .await
        .unwrap();
    assert!(again.is_ok());
}

#[tokio::test]
async fn test_update_missing_order_is_a_fail_result() {
    let system = start().await;

    let response = system
        .order_client
        .update_order(OrderId::generate(), OrderUpdateRequest::delivered())
        .await
        .unwrap();
    assert_eq!(response, ApiResponse::fail(NO_SUCH_ORDER));
}

#[tokio::test]
async fn test_orders_outlive_deleted_pizzas() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let user = UserId::generate();
    let order = place(&system, request(&[(margherita, 2)]), user).await;

    system.catalog_client.delete_pizza("margherita").await.unwrap();

    let orders = system.order_client.get_all_orders(user).await.unwrap();
    assert_eq!(orders, vec![order]);
}

#[tokio::test]
async fn test_manager_delete_removes_order_and_lines() {
    let system = start().await;
    let margherita = add(&system, Pizza::new("margherita", 20.5, 520, 320)).await;
    let order = place(&system, request(&[(margherita, 2)]), UserId::generate()).await;
    let manager = OrderManager::new(system.database().clone());

    manager.delete(&order.id).await.unwrap();
    assert!(manager.get(&order.id).await.unwrap().is_none());
    assert_eq!(count(system.database(), "orders_pizzas").await, 0);

    let missing = manager.delete(&order.id).await;
    assert!(matches!(missing, Err(OrderError::NotFound(id)) if id == order.id));
}
