use crate::{
    apis::{
        customers::Customer,
        funding_sources::FundingSource,
        shared::{AchDetails, Amount, Clearing, Metadata},
        transfers::Transfer,
    },
    error::HalError,
    hal::{impl_hal_resource, Collection, Link, Resource},
    pollable::IsInTerminalState,
    transport::RequestOptions,
    Error, Pollable,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use urlencoding::encode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MassPaymentStatus {
    Deferred,
    Pending,
    Processing,
    Complete,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MassPaymentItemStatus {
    Pending,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

/// A batch of up to 5000 payments from a single funding source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MassPayment {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub status: MassPaymentStatus,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub clearing: Option<Clearing>,
    #[serde(default)]
    pub ach_details: Option<AchDetails>,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub total_fees: Option<Amount>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl_hal_resource!(MassPayment);

/// A single payment of a [`MassPayment`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MassPaymentItem {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub status: MassPaymentItemStatus,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(rename = "_embedded", default)]
    pub embedded: HashMap<String, Vec<HalError>>,
}

impl_hal_resource!(MassPaymentItem);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MassPaymentLinks {
    pub source: Link,
}

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct MassPaymentRequest {
    #[serde(rename = "_links")]
    #[builder(setter(custom))]
    pub links: MassPaymentLinks,
    pub items: Vec<MassPaymentItemRequest>,
    /// Set to [`MassPaymentStatus::Deferred`] to create the mass payment without processing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option), default)]
    pub status: Option<MassPaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub clearing: Option<Clearing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub ach_details: Option<AchDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub correlation_id: Option<String>,
}

impl MassPaymentRequestBuilder {
    /// Funding source the money is taken from.
    pub fn source(&mut self, source: Link) -> &mut Self {
        self.links = Some(MassPaymentLinks { source });
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MassPaymentItemLinks {
    pub destination: Link,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MassPaymentItemRequest {
    #[serde(rename = "_links")]
    pub links: MassPaymentItemLinks,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl MassPaymentItemRequest {
    pub fn new(destination: Link, amount: Amount) -> Self {
        Self {
            links: MassPaymentItemLinks { destination },
            amount,
            metadata: None,
            correlation_id: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
pub(crate) struct StatusUpdate {
    pub(crate) status: MassPaymentStatus,
}

impl MassPayment {
    /// Lists the items of this mass payment, embedded under `items`.
    ///
    /// Items can be filtered with a `status` query parameter.
    pub async fn list_items(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<MassPaymentItem>, Error> {
        let (transport, link) = self.resource.follow("items")?;

        transport.fetch(&link.href, options).await
    }

    #[tracing::instrument(name = "Retrieve Mass Payment Item", skip(self))]
    pub async fn retrieve_item(&self, id: &str) -> Result<MassPaymentItem, Error> {
        self.resource
            .transport()?
            .fetch(
                &format!("mass-payment-items/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    /// Retrieves the funding source this mass payment draws from.
    pub async fn source(&self) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("source")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}

#[async_trait]
impl Pollable for MassPayment {
    type Output = MassPayment;

    async fn poll_once(&self) -> Result<Self::Output, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}

impl IsInTerminalState for MassPayment {
    /// A mass payment is considered to be in a terminal state if it is `Complete` or `Cancelled`.
    ///
    /// `Deferred` is not terminal: it waits for a status update.
    fn is_in_terminal_state(&self) -> bool {
        matches!(
            self.status,
            MassPaymentStatus::Complete | MassPaymentStatus::Cancelled
        )
    }
}

impl MassPaymentItem {
    /// Failure reasons of a failed item.
    pub fn errors(&self) -> &[HalError] {
        self.embedded
            .get("errors")
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub async fn mass_payment(&self) -> Result<MassPayment, Error> {
        let (transport, link) = self.resource.follow("mass-payment")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Retrieves the transfer created for this item. Absent until the item is processed.
    pub async fn transfer(&self) -> Result<Transfer, Error> {
        let (transport, link) = self.resource.follow("transfer")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    pub async fn destination(&self) -> Result<Customer, Error> {
        let (transport, link) = self.resource.follow("destination")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}
