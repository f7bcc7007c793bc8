//! Pure data structures handled by the actors.
//!
//! [`Pizza`] and [`Order`] implement [`ActorEntity`](resource_framework::ActorEntity) in their
//! actor modules; everything else here is a request payload or the [`ApiResponse`] envelope
//! returned to callers.

pub mod ids;
pub mod order;
pub mod pizza;
pub mod response;

pub use ids::*;
pub use order::*;
pub use pizza::*;
pub use response::*;
