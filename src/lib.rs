//! Rust client for the [Dwolla](https://www.dwolla.com) HAL+JSON payments API.
//!
//! Every Dwolla response is a HAL document: besides its fields, a resource carries a
//! `_links` map telling which operations are available on it *right now*. This crate
//! follows those links instead of building URLs, so the operations exposed by a resource
//! (cancel a transfer, verify micro-deposits, ...) fail locally with
//! [`Error::MissingLink`] when the server did not offer them.
//!
//! # Usage
//!
//! ## Initialize a new `DwollaClient`
//!
//! Create a new [`DwollaClient`](crate::client::DwollaClient) with your application key and secret.
//!
//! ```rust,no_run
//! # use dwolla_rust::{DwollaClient, apis::auth::Credentials, client::Environment};
//! # #[tokio::main]
//! # async fn main() {
//! let dwolla = DwollaClient::builder(Credentials::new("some-key", "some-secret"))
//!     .with_environment(Environment::Sandbox)
//!     .build();
//! # }
//! ```
//!
//! By default, a `DwollaClient` connects to the production environment. Access tokens are
//! requested on first use, refreshed when they expire, and requested again transparently
//! if the server rejects one as expired.
//!
//! ## Create a transfer
//!
//! ```rust,no_run
//! # use dwolla_rust::{DwollaClient, Error, HalResource, apis::shared::*, apis::transfers::*, hal::Link};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let dwolla: DwollaClient = unreachable!();
//! let account = dwolla.accounts.retrieve().await?;
//! let sources = account.list_funding_sources(Some(false)).await?;
//! let source = &sources.items("funding-sources")[0];
//!
//! let request = TransferRequestBuilder::default()
//!     .links(TransferLinks::new(
//!         source.link("self")?.clone(),
//!         Link::new("https://api-sandbox.dwolla.com/funding-sources/5cfcdc41-10f6-4a45-b11d-7ac89893d985"),
//!     ))
//!     .amount(Amount::usd("10.00"))
//!     .build()
//!     .unwrap();
//!
//! let transfer = dwolla
//!     .transfers
//!     .create(&request, Some("a-unique-idempotency-key"))
//!     .await?;
//! println!("Created transfer {} ({:?})", transfer.id, transfer.status);
//!
//! // Operations are only available when the server offers them
//! if transfer.has_link("cancel") {
//!     transfer.cancel().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Handle validation errors
//!
//! ```rust,no_run
//! # use dwolla_rust::{DwollaClient, Error, apis::customers::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let dwolla: DwollaClient = unreachable!();
//! # let request: CustomerRequest = unreachable!();
//! match dwolla.customers.create(&request, None).await {
//!     Ok(customer) => println!("Created customer {}", customer.id),
//!     Err(Error::ValidationError(e)) => {
//!         for field in e.errors() {
//!             println!("{:?}: {}", field.path, field.message);
//!         }
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! ```shell
//! cargo run --example create_transfer
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub(crate) mod authenticator;
pub mod client;
mod common;
pub mod error;
pub mod hal;
mod middlewares;
pub mod pollable;
pub mod transport;

pub use client::DwollaClient;
pub use error::Error;
pub use hal::HalResource;
pub use pollable::{Pollable, PollableUntilTerminalState};
