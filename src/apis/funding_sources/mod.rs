//! APIs and models related to funding sources and micro-deposits.

mod api;
mod model;

pub use api::FundingSourcesApi;
pub use model::*;
