use chrono::{TimeZone, Utc};
use pizzeria::config::AppSettings;
use pizzeria::lifecycle::PizzeriaSystem;
use pizzeria::model::{
    ApiResponse, OrderAddRequest, OrderId, OrderStatus, OrderUpdateRequest, OrderedItem, Pizza,
    UserId,
};
use pizzeria::order_actor::NO_ACTIVE_ORDERS;
use pizzeria::seed;

/// Full end-to-end run through both real actors: add a pizza, order it, deliver it.
#[tokio::test]
async fn test_margherita_order_is_placed_and_delivered() {
    let system = PizzeriaSystem::start(&AppSettings::default())
        .await
        .expect("system starts");

    // Catalog: margherita with two ingredients
    let margherita = Pizza::new("margherita", 20.5, 520, 320)
        .with_category("classic")
        .with_description("mega pizza")
        .with_ingredients(["mozzarella", "tomato"]);
    let added = system
        .catalog_client
        .add_pizza(margherita)
        .await
        .expect("catalog reachable");
    assert!(added.is_ok());
    let margherita = added.into_payload().expect("stored pizza");

    // Order two of them
    let user = UserId::generate();
    let request = OrderAddRequest {
        id: OrderId::generate(),
        city: "Moscow".into(),
        street: "Arbat".into(),
        building: "12".into(),
        delivery_time: Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap(),
        ordered_items: vec![OrderedItem {
            id: margherita.id,
            amount: 2,
        }],
    };
    let order = system
        .order_client
        .add_order(request, user)
        .await
        .expect("orders reachable")
        .into_payload()
        .expect("order placed");
    assert_eq!(order.total_price, 41.0);
    assert_eq!(order.status(), OrderStatus::Active);

    let active = system.order_client.get_active_orders(user).await.unwrap();
    assert_eq!(active, ApiResponse::ok(vec![order.clone()]));

    // Deliver it
    let delivered = system
        .order_client
        .update_order(order.id, OrderUpdateRequest::delivered())
        .await
        .unwrap()
        .into_payload()
        .unwrap();
    assert_eq!(delivered.status(), OrderStatus::Delivered);
    assert_eq!(delivered.total_price, 41.0);

    let active = system.order_client.get_active_orders(user).await.unwrap();
    assert!(active.is_ok());
    assert_eq!(active.detail(), Some(NO_ACTIVE_ORDERS));
    assert!(active.payload().is_none());

    let history = system.order_client.get_all_orders(user).await.unwrap();
    assert_eq!(history, vec![delivered]);

    system.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn test_seeding_twice_skips_existing_pizzas() {
    let settings = AppSettings {
        seed_demo_data: true,
        ..AppSettings::default()
    };
    let system = PizzeriaSystem::start(&settings).await.unwrap();

    let report = seed::seed_catalog(&system.catalog_client).await.unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.skipped, seed::demo_catalog().len());

    let pizzas = system.catalog_client.get_all_pizzas().await.unwrap();
    assert_eq!(pizzas.len(), seed::demo_catalog().len());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_file_database_survives_restart() {
    let path = std::env::temp_dir().join(format!("pizzeria-{}.db", uuid::Uuid::new_v4()));
    let settings = AppSettings {
        database_url: format!("sqlite://{}", path.display()),
        ..AppSettings::default()
    };

    let system = PizzeriaSystem::start(&settings).await.unwrap();
    system
        .catalog_client
        .add_pizza(Pizza::new("marinara", 15.0, 410, 300).with_ingredients(["tomato", "garlic"]))
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    let system = PizzeriaSystem::start(&settings).await.unwrap();
    let marinara = system
        .catalog_client
        .get_pizza("marinara")
        .await
        .unwrap()
        .into_payload()
        .expect("pizza persisted");
    assert_eq!(marinara.ingredient_names(), vec!["tomato", "garlic"]);
    system.shutdown().await.unwrap();

    remove_database(&path);
}

/// Both actors write to one file database at the same time, each write reading before it
/// inserts.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_actors_write_in_parallel_on_a_file_database() {
    let path = std::env::temp_dir().join(format!("pizzeria-{}.db", uuid::Uuid::new_v4()));
    let settings = AppSettings {
        database_url: format!("sqlite://{}", path.display()),
        ..AppSettings::default()
    };
    let system = PizzeriaSystem::start(&settings).await.unwrap();
    let margherita = system
        .catalog_client
        .add_pizza(Pizza::new("margherita", 20.5, 520, 320).with_ingredients(["mozzarella"]))
        .await
        .unwrap()
        .into_payload()
        .unwrap();
    let user = UserId::generate();

    let mut catalog_writes = Vec::new();
    let mut order_writes = Vec::new();
    for n in 0..100 {
        let catalog = system.catalog_client.clone();
        catalog_writes.push(tokio::spawn(async move {
            let special = Pizza::new(format!("special {n}"), 12.0, 400, 300)
                .with_category("specials")
                .with_ingredients(["mozzarella".to_string(), format!("topping {n}")]);
            catalog.add_pizza(special).await
        }));

        let orders = system.order_client.clone();
        let request = OrderAddRequest {
            id: OrderId::generate(),
            city: "Moscow".into(),
            street: "Arbat".into(),
            building: n.to_string(),
            delivery_time: Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap(),
            ordered_items: vec![OrderedItem {
                id: margherita.id,
                amount: 1,
            }],
        };
        order_writes.push(tokio::spawn(async move { orders.add_order(request, user).await }));
    }

    for write in catalog_writes {
        assert!(write.await.unwrap().expect("catalog write succeeds").is_ok());
    }
    for write in order_writes {
        assert!(write.await.unwrap().expect("order write succeeds").is_ok());
    }

    assert_eq!(system.catalog_client.get_all_pizzas().await.unwrap().len(), 101);
    assert_eq!(system.order_client.get_all_orders(user).await.unwrap().len(), 100);

    system.shutdown().await.unwrap();
    remove_database(&path);
}

fn remove_database(path: &std::path::Path) {
    let _ = std::fs::remove_file(path);
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let _ = std::fs::remove_file(sidecar);
    }
}
