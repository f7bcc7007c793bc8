//! # Catalog Client
//!
//! High-level API for the catalog actor.

use crate::catalog_actor::{CatalogError, DUPLICATE_PIZZA, NO_SUCH_PIZZA};
use crate::model::{ApiResponse, Pizza, PizzaUpdateRequest};
use async_trait::async_trait;
use resource_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Pizza>,
}

#[async_trait]
impl ActorClient<Pizza> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Pizza> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CatalogError::from(e)
    }
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Pizza>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_pizza(&self, name: &str) -> Result<ApiResponse<Pizza>, CatalogError> {
        match ActorClient::get(self, name.to_string()).await? {
            Some(pizza) => Ok(ApiResponse::ok(pizza)),
            None => Ok(ApiResponse::fail(NO_SUCH_PIZZA)),
        }
    }

    /// Every pizza in the catalog, ordered by name.
    #[instrument(skip(self))]
    pub async fn get_all_pizzas(&self) -> Result<Vec<Pizza>, CatalogError> {
        ActorClient::list(self, ()).await
    }

    /// Adds a pizza, reusing existing categories and ingredients with the same names.
    ///
    /// The payload is the pizza as stored, with the ids of any reused rows.
    #[instrument(skip(self, pizza), fields(pizza = %pizza.name))]
    pub async fn add_pizza(&self, pizza: Pizza) -> Result<ApiResponse<Pizza>, CatalogError> {
        debug!("Sending request");
        respond(self.inner.create(pizza).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_pizza(&self, name: &str) -> Result<ApiResponse<()>, CatalogError> {
        debug!("Sending request");
        respond(self.inner.delete(name.to_string()).await).map(|response| {
            if response.is_ok() {
                ApiResponse::done()
            } else {
                response
            }
        })
    }

    #[instrument(skip(self))]
    pub async fn update_pizza(
        &self,
        name: &str,
        update: PizzaUpdateRequest,
    ) -> Result<ApiResponse<Pizza>, CatalogError> {
        debug!("Sending request");
        respond(self.inner.update(name.to_string(), update).await)
    }
}

fn respond<T>(outcome: Result<T, FrameworkError>) -> Result<ApiResponse<T>, CatalogError> {
    match outcome {
        Ok(value) => Ok(ApiResponse::ok(value)),
        Err(FrameworkError::NotFound(_)) => Ok(ApiResponse::fail(NO_SUCH_PIZZA)),
        Err(FrameworkError::Conflict(_)) => Ok(ApiResponse::fail(DUPLICATE_PIZZA)),
        Err(FrameworkError::Rejected(detail)) => Ok(ApiResponse::fail(detail)),
        Err(e) => Err(e.into()),
    }
}
