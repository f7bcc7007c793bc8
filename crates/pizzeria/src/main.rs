//! # Pizzeria demo
//!
//! Starts the pizzeria, places an order for two margheritas, delivers it and shows the
//! customer's order lists before and after.
//!
//! ```bash
//! RUST_LOG=info cargo run -p pizzeria
//! PIZZERIA_DATABASE_URL=sqlite://pizzeria.db RUST_LOG=debug cargo run -p pizzeria
//! ```

use chrono::{Duration, Utc};
use pizzeria::config::AppSettings;
use pizzeria::lifecycle::PizzeriaSystem;
use pizzeria::model::{OrderAddRequest, OrderId, OrderUpdateRequest, OrderedItem, UserId};
use pizzeria::seed;
use resource_framework::tracing::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let settings = AppSettings::load()?;
    info!(database = %settings.database_url, "Starting pizzeria");
    let system = PizzeriaSystem::start(&settings).await?;

    if !settings.seed_demo_data {
        seed::seed_catalog(&system.catalog_client).await?;
    }

    let menu = system.catalog_client.get_all_pizzas().await?;
    for pizza in &menu {
        info!(pizza = %pizza.name, price = pizza.price, ingredients = ?pizza.ingredient_names(), "On the menu");
    }

    let Some(margherita) = system
        .catalog_client
        .get_pizza("margherita")
        .await?
        .into_payload()
    else {
        error!("Demo catalog has no margherita");
        system.shutdown().await?;
        return Ok(());
    };

    let customer = UserId::generate();
    let request = OrderAddRequest {
        id: OrderId::generate(),
        city: "Moscow".to_string(),
        street: "Arbat".to_string(),
        building: "12".to_string(),
        delivery_time: Utc::now() + Duration::hours(1),
        ordered_items: vec![OrderedItem {
            id: margherita.id,
            amount: 2,
        }],
    };

    let span = tracing::info_span!("order_processing", user_id = %customer);
    async {
        let placed = system.order_client.add_order(request, customer).await?;
        let order = match placed.payload {
            Some(order) => order,
            None => {
                error!(detail = ?placed.detail, "Order rejected");
                return Ok(());
            }
        };
        info!(order_id = %order.id, total = order.total_price, status = %order.status(), "Order placed");

        let active = system.order_client.get_active_orders(customer).await?;
        info!(active = active.payload().map_or(0, Vec::len), "Active orders");

        let delivered = system
            .order_client
            .update_order(order.id, OrderUpdateRequest::delivered())
            .await?;
        if let Some(order) = delivered.payload() {
            info!(order_id = %order.id, status = %order.status(), "Order delivered");
        }

        let active = system.order_client.get_active_orders(customer).await?;
        info!(detail = ?active.detail(), "Active orders after delivery");
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Pizzeria demo completed");
    Ok(())
}
