//! APIs and models related to verification documents.

mod api;
mod model;

pub use api::DocumentsApi;
pub use model::*;
