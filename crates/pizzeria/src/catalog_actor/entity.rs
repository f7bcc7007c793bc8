use crate::model::{Pizza, PizzaUpdateRequest};
use resource_framework::ActorEntity;

/// Pizzas are addressed by name. A new pizza is its own creation payload and the catalog is
/// always listed whole.
impl ActorEntity for Pizza {
    type Key = String;
    type Create = Pizza;
    type Update = PizzaUpdateRequest;
    type Filter = ();

    fn key(&self) -> String {
        self.name.clone()
    }
}
