//! APIs and models related to webhook subscriptions and webhooks.

mod api;
mod model;

pub use api::WebhookSubscriptionsApi;
pub use model::*;
