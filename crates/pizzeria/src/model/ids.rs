//! Type-safe identifiers.
//!
//! Every identifier wraps a random v4 [`Uuid`]. They are stored as hyphenated text and
//! serialize as a bare UUID string.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// A fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a catalog pizza.
    PizzaId
);
uuid_id!(
    /// Identifier of a pizza category.
    CategoryId
);
uuid_id!(
    /// Identifier of an ingredient.
    IngredientId
);
uuid_id!(
    /// Identifier of a customer order.
    OrderId
);
uuid_id!(
    /// Identifier of the customer owning an order. Users live outside this system.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        let id = OrderId::generate();
        let parsed: OrderId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(PizzaId::generate(), PizzaId::generate());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!("margherita".parse::<UserId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = UserId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
