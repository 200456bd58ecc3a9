//! APIs and models related to mass payments.

mod api;
mod model;

pub use api::MassPaymentsApi;
pub use model::*;
