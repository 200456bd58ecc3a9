//! APIs and models related to events.

mod api;
mod model;

pub use api::EventsApi;
pub use model::*;
