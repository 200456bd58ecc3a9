//! Clients for the various Dwolla APIs.
//!
//! Each sub-module holds a service reachable from [`DwollaClient`](crate::DwollaClient),
//! with id-based entry points, and the resources it returns, whose methods follow links.

pub mod accounts;
pub mod auth;
pub mod beneficial_owners;
pub mod business_classifications;
pub mod client_tokens;
pub mod customers;
pub mod documents;
pub mod events;
pub mod funding_sources;
pub mod kba;
pub mod mass_payments;
pub mod on_demand_authorizations;
pub mod shared;
pub mod transfers;
pub mod webhook_subscriptions;
