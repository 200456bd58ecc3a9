//! APIs and models related to knowledge based authentication.

mod api;
mod model;

pub use api::KbaApi;
pub use model::*;
