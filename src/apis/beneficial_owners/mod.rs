//! APIs and models related to beneficial owners of business customers.

mod api;
mod model;

pub use api::BeneficialOwnersApi;
pub use model::*;
