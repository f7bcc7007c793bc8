//! Catalog entries.
//!
//! A [`Pizza`] is looked up by its unique `name`. Categories and ingredients are shared
//! between pizzas and are matched by name too: adding a pizza that mentions an existing
//! category reuses that row instead of creating a second one.
//!
//! # Actor Framework
//! [`Pizza`] implements [`ActorEntity`](resource_framework::ActorEntity) in
//! [`catalog_actor`](crate::catalog_actor): a pizza itself is the creation payload,
//! [`PizzaUpdateRequest`] is the update payload and the catalog has no list filter.

use crate::model::{CategoryId, IngredientId, PizzaId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default = "CategoryId::generate")]
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default = "IngredientId::generate")]
    pub id: IngredientId,
    pub name: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: IngredientId::generate(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    #[serde(default = "PizzaId::generate")]
    pub id: PizzaId,
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub calories: u32,
    /// Grams.
    pub weight: u32,
    /// Kept in the order they were given when the pizza was added.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Pizza {
    /// Creates an uncategorised pizza without description or ingredients.
    pub fn new(name: impl Into<String>, price: f64, calories: u32, weight: u32) -> Self {
        Self {
            id: PizzaId::generate(),
            name: name.into(),
            category: None,
            description: None,
            price,
            calories,
            weight,
            ingredients: Vec::new(),
        }
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(Category::new(name));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_ingredients<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = names.into_iter().map(Ingredient::new).collect();
        self
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Partial update of a pizza's scalar fields.
///
/// Only the fields that are `Some` are written. `category` names the category to move the
/// pizza to; it is created when no category with that name exists yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PizzaUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl PizzaUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.calories.is_none()
            && self.weight.is_none()
    }
}
