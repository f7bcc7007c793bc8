//! Sqlite-backed catalog repository.
//!
//! Categories and ingredients are deduplicated by name: adding or updating a pizza links to
//! an existing row with the same name and only inserts names never seen before. Every write
//! runs in one transaction.

use crate::catalog_actor::CatalogError;
use crate::model::{Category, CategoryId, Ingredient, Pizza, PizzaId, PizzaUpdateRequest};
use crate::storage::schema::{Categories, Ingredients, PizzaIngredient, Pizzas};
use crate::storage::{optional_column, parse_column, u32_column, Database, StorageError};
use async_trait::async_trait;
use resource_framework::Repository;
use sea_query::{Expr, Order as SortOrder, Query, SimpleExpr, SqliteQueryBuilder};
use sea_query_binder::{SqlxBinder, SqlxValues};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CatalogManager {
    database: Database,
}

impl CatalogManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Repository<Pizza> for CatalogManager {
    type Error = CatalogError;

    async fn create(&self, pizza: Pizza) -> Result<Pizza, CatalogError> {
        let Pizza {
            id,
            name,
            category,
            description,
            price,
            calories,
            weight,
            ingredients,
        } = pizza;

        let mut tx = self.database.begin().await?;
        if pizza_id_by_name(&mut tx, &name).await?.is_some() {
            return Err(CatalogError::DuplicateName(name));
        }

        let category = match category {
            Some(category) => Some(resolve_category(&mut tx, category).await?),
            None => None,
        };
        let ingredients = resolve_ingredients(&mut tx, ingredients).await?;

        let (sql, values) = Query::insert()
            .into_table(Pizzas::Table)
            .columns([
                Pizzas::Id,
                Pizzas::Name,
                Pizzas::CategoryId,
                Pizzas::Description,
                Pizzas::Price,
                Pizzas::Calories,
                Pizzas::Weight,
            ])
            .values_panic([
                id.to_string().into(),
                name.as_str().into(),
                category.as_ref().map(|c| c.id.to_string()).into(),
                description.clone().into(),
                price.into(),
                i64::from(calories).into(),
                i64::from(weight).into(),
            ])
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        link_ingredients(&mut tx, id, &ingredients).await?;
        tx.commit().await?;

        Ok(Pizza {
            id,
            name,
            category,
            description,
            price,
            calories,
            weight,
            ingredients,
        })
    }

    async fn get(&self, name: &String) -> Result<Option<Pizza>, CatalogError> {
        let mut conn = self.database.acquire().await?;
        let (sql, values) = select_pizzas()
            .and_where(Expr::col(Pizzas::Name).eq(name.as_str()))
            .build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_with(&sql, values)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(Some(hydrate(&mut conn, &row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, _filter: ()) -> Result<Vec<Pizza>, CatalogError> {
        let mut conn = self.database.acquire().await?;
        let (sql, values) = select_pizzas()
            .order_by(Pizzas::Name, SortOrder::Asc)
            .build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_with(&sql, values).fetch_all(&mut *conn).await?;

        let mut pizzas = Vec::with_capacity(rows.len());
        for row in &rows {
            pizzas.push(hydrate(&mut conn, row).await?);
        }
        Ok(pizzas)
    }

    async fn update(
        &self,
        name: &String,
        update: PizzaUpdateRequest,
    ) -> Result<Pizza, CatalogError> {
        let mut tx = self.database.begin().await?;
        let id = pizza_id_by_name(&mut tx, name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(name.clone()))?;

        if let Some(new_name) = &update.name {
            if new_name != name && pizza_id_by_name(&mut tx, new_name).await?.is_some() {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }
        let category = match &update.category {
            Some(category) => {
                Some(resolve_category(&mut tx, Category::new(category.as_str())).await?)
            }
            None => None,
        };

        if let Some((sql, values)) = update_statement(id, &update, category.as_ref()) {
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let (sql, values) = select_pizzas()
            .and_where(Expr::col(Pizzas::Id).eq(id.to_string()))
            .build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_with(&sql, values).fetch_one(&mut *tx).await?;
        let pizza = hydrate(&mut tx, &row).await?;

        tx.commit().await?;
        Ok(pizza)
    }

    async fn delete(&self, name: &String) -> Result<(), CatalogError> {
        let mut tx = self.database.begin().await?;
        let id = pizza_id_by_name(&mut tx, name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(name.clone()))?;

        let (sql, values) = Query::delete()
            .from_table(PizzaIngredient::Table)
            .and_where(Expr::col(PizzaIngredient::PizzaId).eq(id.to_string()))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(Pizzas::Table)
            .and_where(Expr::col(Pizzas::Id).eq(id.to_string()))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

fn select_pizzas() -> sea_query::SelectStatement {
    Query::select()
        .columns([
            Pizzas::Id,
            Pizzas::Name,
            Pizzas::CategoryId,
            Pizzas::Description,
            Pizzas::Price,
            Pizzas::Calories,
            Pizzas::Weight,
        ])
        .from(Pizzas::Table)
        .to_owned()
}

/// `UPDATE` for the supplied fields, or `None` when nothing changes.
fn update_statement(
    id: PizzaId,
    update: &PizzaUpdateRequest,
    category: Option<&Category>,
) -> Option<(String, SqlxValues)> {
    let mut changes: Vec<(Pizzas, SimpleExpr)> = Vec::new();
    if let Some(name) = &update.name {
        changes.push((Pizzas::Name, name.as_str().into()));
    }
    if let Some(category) = category {
        changes.push((Pizzas::CategoryId, category.id.to_string().into()));
    }
    if let Some(description) = &update.description {
        changes.push((Pizzas::Description, description.as_str().into()));
    }
    if let Some(price) = update.price {
        changes.push((Pizzas::Price, price.into()));
    }
    if let Some(calories) = update.calories {
        changes.push((Pizzas::Calories, i64::from(calories).into()));
    }
    if let Some(weight) = update.weight {
        changes.push((Pizzas::Weight, i64::from(weight).into()));
    }
    if changes.is_empty() {
        return None;
    }

    let mut statement = Query::update();
    statement
        .table(Pizzas::Table)
        .and_where(Expr::col(Pizzas::Id).eq(id.to_string()));
    for (column, value) in changes {
        statement.value(column, value);
    }
    Some(statement.build_sqlx(SqliteQueryBuilder))
}

async fn pizza_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<PizzaId>, StorageError> {
    let (sql, values) = Query::select()
        .column(Pizzas::Id)
        .from(Pizzas::Table)
        .and_where(Expr::col(Pizzas::Name).eq(name))
        .build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|row| parse_column(&row, "id")).transpose()
}

/// Turns a pizza row into a [`Pizza`], loading its category and ordered ingredients.
async fn hydrate(conn: &mut SqliteConnection, row: &SqliteRow) -> Result<Pizza, StorageError> {
    let id: PizzaId = parse_column(row, "id")?;
    let category_id: Option<CategoryId> = optional_column(row, "category_id")?;

    let category = match category_id {
        Some(category_id) => {
            let (sql, values) = Query::select()
                .columns([Categories::Id, Categories::Name])
                .from(Categories::Table)
                .and_where(Expr::col(Categories::Id).eq(category_id.to_string()))
                .build_sqlx(SqliteQueryBuilder);
            let row = sqlx::query_with(&sql, values).fetch_one(&mut *conn).await?;
            Some(Category {
                id: category_id,
                name: row.try_get("name")?,
            })
        }
        None => None,
    };

    let (sql, values) = Query::select()
        .column((Ingredients::Table, Ingredients::Id))
        .column((Ingredients::Table, Ingredients::Name))
        .from(PizzaIngredient::Table)
        .inner_join(
            Ingredients::Table,
            Expr::col((Ingredients::Table, Ingredients::Id))
                .equals((PizzaIngredient::Table, PizzaIngredient::IngredientId)),
        )
        .and_where(Expr::col((PizzaIngredient::Table, PizzaIngredient::PizzaId)).eq(id.to_string()))
        .order_by((PizzaIngredient::Table, PizzaIngredient::Position), SortOrder::Asc)
        .build_sqlx(SqliteQueryBuilder);
    let ingredient_rows = sqlx::query_with(&sql, values).fetch_all(&mut *conn).await?;
    let ingredients = ingredient_rows
        .iter()
        .map(|row| -> Result<Ingredient, StorageError> {
            Ok(Ingredient {
                id: parse_column(row, "id")?,
                name: row.try_get("name")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pizza {
        id,
        name: row.try_get("name")?,
        category,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        calories: u32_column(row, "calories")?,
        weight: u32_column(row, "weight")?,
        ingredients,
    })
}

/// Returns the stored category with this name, inserting `category` when there is none.
async fn resolve_category(
    conn: &mut SqliteConnection,
    category: Category,
) -> Result<Category, StorageError> {
    let (sql, values) = Query::select()
        .column(Categories::Id)
        .from(Categories::Table)
        .and_where(Expr::col(Categories::Name).eq(category.name.as_str()))
        .build_sqlx(SqliteQueryBuilder);
    if let Some(row) = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
    {
        debug!(category = %category.name, "Reusing category");
        return Ok(Category {
            id: parse_column(&row, "id")?,
            name: category.name,
        });
    }

    let (sql, values) = Query::insert()
        .into_table(Categories::Table)
        .columns([Categories::Id, Categories::Name])
        .values_panic([category.id.to_string().into(), category.name.as_str().into()])
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    Ok(category)
}

/// Resolves each ingredient by name like [`resolve_category`]. Repeated names are kept once,
/// at their first position.
async fn resolve_ingredients(
    conn: &mut SqliteConnection,
    ingredients: Vec<Ingredient>,
) -> Result<Vec<Ingredient>, StorageError> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(ingredients.len());

    for ingredient in ingredients {
        if !seen.insert(ingredient.name.clone()) {
            continue;
        }

        let (sql, values) = Query::select()
            .column(Ingredients::Id)
            .from(Ingredients::Table)
            .and_where(Expr::col(Ingredients::Name).eq(ingredient.name.as_str()))
            .build_sqlx(SqliteQueryBuilder);
        let existing = sqlx::query_with(&sql, values)
            .fetch_optional(&mut *conn)
            .await?;

        match existing {
            Some(row) => resolved.push(Ingredient {
                id: parse_column(&row, "id")?,
                name: ingredient.name,
            }),
            None => {
                let (sql, values) = Query::insert()
                    .into_table(Ingredients::Table)
                    .columns([Ingredients::Id, Ingredients::Name])
                    .values_panic([
                        ingredient.id.to_string().into(),
                        ingredient.name.as_str().into(),
                    ])
                    .build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *conn).await?;
                resolved.push(ingredient);
            }
        }
    }
    Ok(resolved)
}

async fn link_ingredients(
    conn: &mut SqliteConnection,
    pizza_id: PizzaId,
    ingredients: &[Ingredient],
) -> Result<(), StorageError> {
    for (position, ingredient) in ingredients.iter().enumerate() {
        let (sql, values) = Query::insert()
            .into_table(PizzaIngredient::Table)
            .columns([
                PizzaIngredient::PizzaId,
                PizzaIngredient::IngredientId,
                PizzaIngredient::Position,
            ])
            .values_panic([
                pizza_id.to_string().into(),
                ingredient.id.to_string().into(),
                (position as i64).into(),
            ])
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }
    Ok(())
}
