use crate::storage::StorageError;
use resource_framework::FrameworkError;
use thiserror::Error;

pub const NO_SUCH_PIZZA: &str = "No such pizza";
pub const DUPLICATE_PIZZA: &str = "pizza with such name already exists";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Pizza not found: {0}")]
    NotFound(String),

    #[error("Pizza already exists: {0}")]
    DuplicateName(String),

    #[error("Catalog storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog repository error: {0}")]
    Repository(Box<dyn std::error::Error + Send + Sync>),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::Storage(e.into())
    }
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<CatalogError>() {
                Ok(inner) => *inner,
                Err(source) => CatalogError::Repository(source),
            },
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                CatalogError::ActorCommunicationError(e.to_string())
            }
            FrameworkError::NotFound(name) => CatalogError::NotFound(name),
            FrameworkError::Conflict(name) => CatalogError::DuplicateName(name),
            other @ FrameworkError::Rejected(_) => CatalogError::Repository(Box::new(other)),
        }
    }
}

/// Lookups and name clashes become domain failures; storage trouble stays an entity error.
impl From<CatalogError> for FrameworkError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(name) => FrameworkError::NotFound(name),
            CatalogError::DuplicateName(_) => FrameworkError::Conflict(DUPLICATE_PIZZA.to_string()),
            other => FrameworkError::EntityError(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_domain_failures() {
        let not_found = FrameworkError::from(CatalogError::NotFound("hawaii".into()));
        assert!(matches!(not_found, FrameworkError::NotFound(ref name) if name == "hawaii"));

        let duplicate = FrameworkError::from(CatalogError::DuplicateName("margherita".into()));
        assert!(matches!(duplicate, FrameworkError::Conflict(ref detail) if detail == DUPLICATE_PIZZA));
    }

    #[test]
    fn test_storage_errors_are_not_domain_failures() {
        let storage = CatalogError::Storage(StorageError::InvalidValue {
            column: "id",
            value: "x".into(),
        });
        let mapped = FrameworkError::from(storage);
        assert!(!mapped.is_domain_failure());
        assert!(mapped.to_string().contains("Catalog storage error"));

        let back = CatalogError::from(mapped);
        assert!(matches!(
            back,
            CatalogError::Storage(StorageError::InvalidValue { column: "id", .. })
        ));
    }

    #[test]
    fn test_foreign_entity_errors_are_kept_as_repository_errors() {
        let mapped = CatalogError::from(FrameworkError::EntityError(Box::new(
            std::io::Error::other("disk full"),
        )));
        assert!(matches!(mapped, CatalogError::Repository(ref source) if source.to_string() == "disk full"));
    }
}
