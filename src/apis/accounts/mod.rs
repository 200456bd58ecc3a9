//! APIs and models related to the master account.

mod api;
mod model;

pub use api::AccountsApi;
pub use model::*;
