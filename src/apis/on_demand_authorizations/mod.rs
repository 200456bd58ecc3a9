//! APIs and models related to on-demand transfer authorizations.

mod api;
mod model;

pub use api::OnDemandAuthorizationsApi;
pub use model::*;
