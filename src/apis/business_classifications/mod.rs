//! APIs and models related to business classifications.

mod api;
mod model;

pub use api::BusinessClassificationsApi;
pub use model::*;
