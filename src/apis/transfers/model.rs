use crate::{
    apis::{
        funding_sources::FundingSource,
        shared::{AchDetails, Amount, Clearing, Metadata},
    },
    hal::{impl_hal_resource, Collection, Link, Resource},
    pollable::IsInTerminalState,
    transport::RequestOptions,
    Error, Pollable,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Processed,
    Failed,
    Cancelled,
    Reclaimed,
    #[serde(other)]
    Unknown,
}

/// A transfer of money between two funding sources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub status: TransferStatus,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clearing: Option<Clearing>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub individual_ach_id: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl_hal_resource!(Transfer);

/// Source and destination of a new transfer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransferLinks {
    pub source: Link,
    pub destination: Link,
}

impl TransferLinks {
    /// Links a transfer from one funding source (or account) to another.
    pub fn new(source: Link, destination: Link) -> Self {
        Self {
            source,
            destination,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(rename = "_links")]
    pub links: TransferLinks,
    pub amount: Amount,
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

/// ACH return details of a failed transfer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransferFailure {
    #[serde(flatten)]
    pub resource: Resource,
    /// ACH return code, e.g. `R01`.
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl_hal_resource!(TransferFailure);

impl TransferFailure {
    /// Returns `true` for returns caused by a lack of funds (`R01`, `R09`).
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self.code.as_str(), "R01" | "R09")
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
struct Cancellation {
    status: TransferStatus,
}

impl Transfer {
    /// Cancels a pending transfer, returning its new state.
    #[tracing::instrument(name = "Cancel Transfer", skip(self), fields(id = %self.id))]
    pub async fn cancel(&self) -> Result<Transfer, Error> {
        let (transport, link) = self.resource.follow("cancel")?;

        transport
            .submit(
                &link.href,
                Some(&Cancellation {
                    status: TransferStatus::Cancelled,
                }),
                &RequestOptions::default(),
            )
            .await
    }

    /// Retrieves the reason this transfer failed.
    pub async fn failure(&self) -> Result<TransferFailure, Error> {
        let (transport, link) = self.resource.follow("failure")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Retrieves the funding source the money is taken from.
    pub async fn source(&self) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("source-funding-source")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    pub async fn destination(&self) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("destination-funding-source")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Lists the facilitator fees charged along with this transfer, embedded under `fees`.
    pub async fn fees(&self) -> Result<Collection<Transfer>, Error> {
        let (transport, link) = self.resource.follow("fees")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}

#[async_trait]
impl Pollable for Transfer {
    type Output = Transfer;

    async fn poll_once(&self) -> Result<Self::Output, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}

impl IsInTerminalState for Transfer {
    /// A transfer is considered to be in a terminal state once it is not `Pending` anymore.
    fn is_in_terminal_state(&self) -> bool {
        matches!(
            self.status,
            TransferStatus::Processed
                | TransferStatus::Failed
                | TransferStatus::Cancelled
                | TransferStatus::Reclaimed
        )
    }
}
