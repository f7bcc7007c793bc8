//! Table and column identifiers for sea-query, plus the DDL run by
//! [`Database::migrate`](super::Database::migrate).

use sea_query::Iden;

#[derive(Iden)]
pub enum Categories {
    #[iden = "categories"]
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Ingredients {
    #[iden = "ingredients"]
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Pizzas {
    #[iden = "pizzas"]
    Table,
    Id,
    Name,
    CategoryId,
    Description,
    Price,
    Calories,
    Weight,
}

/// Pizza to ingredient links. `position` keeps the order ingredients were given in.
#[derive(Iden)]
pub enum PizzaIngredient {
    #[iden = "pizza_ingredient"]
    Table,
    PizzaId,
    IngredientId,
    Position,
}

#[derive(Iden)]
pub enum Orders {
    #[iden = "orders"]
    Table,
    Id,
    UserId,
    City,
    Street,
    Building,
    DeliveryTime,
    TotalPrice,
    IsDelivered,
}

/// Order line items.
#[derive(Iden)]
pub enum OrdersPizzas {
    #[iden = "orders_pizzas"]
    Table,
    OrderId,
    PizzaId,
    Quantity,
    UnitPrice,
    Position,
}

pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE
)"#;

pub const CREATE_INGREDIENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ingredients (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE
)"#;

pub const CREATE_PIZZAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pizzas (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE,
    category_id TEXT REFERENCES categories(id),
    description TEXT,
    price REAL NOT NULL,
    calories INTEGER NOT NULL,
    weight INTEGER NOT NULL
)"#;

pub const CREATE_PIZZA_INGREDIENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pizza_ingredient (
    pizza_id TEXT NOT NULL REFERENCES pizzas(id) ON DELETE CASCADE,
    ingredient_id TEXT NOT NULL REFERENCES ingredients(id),
    position INTEGER NOT NULL,
    PRIMARY KEY (pizza_id, ingredient_id)
)"#;

pub const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    city TEXT NOT NULL,
    street TEXT NOT NULL,
    building TEXT NOT NULL,
    delivery_time TEXT NOT NULL,
    total_price REAL NOT NULL,
    is_delivered INTEGER NOT NULL DEFAULT 0
)"#;

pub const CREATE_ORDERS_USER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id, is_delivered)"#;

// No foreign key on pizza_id: placed orders survive removal of the pizza from the catalog.
pub const CREATE_ORDERS_PIZZAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders_pizzas (
    order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    pizza_id TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    unit_price REAL NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (order_id, pizza_id)
)"#;

/// Every statement needed for an empty database, in dependency order.
pub const SCHEMA: &[&str] = &[
    CREATE_CATEGORIES_TABLE,
    CREATE_INGREDIENTS_TABLE,
    CREATE_PIZZAS_TABLE,
    CREATE_PIZZA_INGREDIENT_TABLE,
    CREATE_ORDERS_TABLE,
    CREATE_ORDERS_USER_INDEX,
    CREATE_ORDERS_PIZZAS_TABLE,
];
