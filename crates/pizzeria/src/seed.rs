//! Demo catalog.
//!
//! Loaded at startup when `PIZZERIA_SEED=true`. The pizzas share ingredients by name, so
//! seeding also exercises reuse of existing ingredient rows. Running it again is harmless:
//! pizzas that already exist come back as duplicate results and are skipped.

use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use crate::model::Pizza;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub added: usize,
    pub skipped: usize,
}

pub fn demo_catalog() -> Vec<Pizza> {
    vec![
        Pizza::new("margherita", 20.5, 520, 320)
            .with_category("classic")
            .with_description("mega pizza")
            .with_ingredients(["mozzarella", "tomato"]),
        Pizza::new("pepperoni", 24.0, 610, 350)
            .with_category("classic")
            .with_description("spicy salami on tomato sauce")
            .with_ingredients(["mozzarella", "tomato", "pepperoni"]),
        Pizza::new("quattro formaggi", 26.5, 680, 340)
            .with_category("cheese")
            .with_description("four cheeses")
            .with_ingredients(["mozzarella", "gorgonzola", "parmesan", "fontina"]),
        Pizza::new("marinara", 15.0, 410, 300)
            .with_category("vegan")
            .with_ingredients(["tomato", "garlic", "oregano"]),
    ]
}

#[instrument(skip(client))]
pub async fn seed_catalog(client: &CatalogClient) -> Result<SeedReport, CatalogError> {
    let mut report = SeedReport::default();
    for pizza in demo_catalog() {
        if client.add_pizza(pizza).await?.is_ok() {
            report.added += 1;
        } else {
            report.skipped += 1;
        }
    }
    info!(added = report.added, skipped = report.skipped, "Demo catalog seeded");
    Ok(report)
}
