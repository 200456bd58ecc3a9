use crate::{
    apis::{customers::Customer, shared::Amount},
    hal::{impl_hal_resource, HalResource, Resource},
    transport::RequestOptions,
    Error, Pollable,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FundingSourceStatus {
    Unverified,
    Verified,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FundingSourceType {
    Bank,
    Balance,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BankAccountType {
    Checking,
    Savings,
    GeneralLedger,
    Loan,
}

/// A bank account or Dwolla balance able to send or receive money.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingSource {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub status: Option<FundingSourceStatus>,
    #[serde(rename = "type", default)]
    pub funding_source_type: Option<FundingSourceType>,
    #[serde(default)]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub balance: Option<Amount>,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl_hal_resource!(FundingSource);

/// Body of a funding source creation or update.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option), default)]
pub struct FundingSourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    /// Arbitrary nickname, 50 characters or less.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    /// Processor token obtained from Plaid, to add and verify a bank in one step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaid_token: Option<String>,
}

impl FundingSourceRequest {
    fn removal() -> Self {
        Self {
            removed: Some(true),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceBalance {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub balance: Option<Amount>,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl_hal_resource!(FundingSourceBalance);

/// Status of the micro-deposits sent to a bank funding source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MicroDeposits {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub failure: Option<serde_json::Value>,
}

impl_hal_resource!(MicroDeposits);

/// The two amounts received on the bank account, to verify it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MicroDepositsRequest {
    pub amount1: Amount,
    pub amount2: Amount,
}

impl FundingSource {
    /// Retrieves the customer owning this funding source.
    pub async fn customer(&self) -> Result<Customer, Error> {
        let (transport, link) = self.resource.follow("customer")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Updates this funding source (e.g. its name), returning its new state.
    #[tracing::instrument(name = "Update Funding Source", skip(self, req), fields(id = %self.id))]
    pub async fn update(
        &self,
        req: &FundingSourceRequest,
        idempotency_key: Option<&str>,
    ) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("self")?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport.submit(&link.href, Some(req), &options).await
    }

    /// Soft deletes this funding source.
    #[tracing::instrument(name = "Remove Funding Source", skip(self), fields(id = %self.id))]
    pub async fn remove(&self) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("remove")?;

        transport
            .submit(
                &link.href,
                Some(&FundingSourceRequest::removal()),
                &RequestOptions::default(),
            )
            .await
    }

    pub async fn balance(&self) -> Result<FundingSourceBalance, Error> {
        let (transport, link) = self.resource.follow("balance")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Sends two micro-deposits to the bank account.
    #[tracing::instrument(name = "Initiate Micro-Deposits", skip(self), fields(id = %self.id))]
    pub async fn initiate_micro_deposits(
        &self,
        idempotency_key: Option<&str>,
    ) -> Result<MicroDeposits, Error> {
        let (transport, link) = self.resource.follow("initiate-micro-deposits")?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport.submit(&link.href, None::<&()>, &options).await
    }

    /// Retrieves the state of the micro-deposits.
    ///
    /// While the deposits are still being processed the server answers
    /// [`Error::TryAgainLater`].
    pub async fn retrieve_micro_deposits(&self) -> Result<MicroDeposits, Error> {
        let (transport, link) = self.resource.follow("verify-micro-deposits")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    #[tracing::instrument(name = "Verify Micro-Deposits", skip_all, fields(id = %self.id))]
    pub async fn verify_micro_deposits(
        &self,
        req: &MicroDepositsRequest,
        idempotency_key: Option<&str>,
    ) -> Result<(), Error> {
        let (transport, link) = self.resource.follow("verify-micro-deposits")?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport
            .submit_without_response(&link.href, Some(req), &options)
            .await?;

        Ok(())
    }

    pub fn can_send(&self) -> bool {
        self.has_link("transfer-send")
    }

    pub fn can_receive(&self) -> bool {
        self.has_link("transfer-receive")
    }

    pub fn can_transfer_from_balance(&self) -> bool {
        self.has_link("transfer-from-balance")
    }

    pub fn can_transfer_to_balance(&self) -> bool {
        self.has_link("transfer-to-balance")
    }

    pub fn failed_micro_deposits_verification(&self) -> bool {
        self.has_link("failed-verification-micro-deposits")
    }
}

#[async_trait]
impl Pollable for FundingSource {
    type Output = FundingSource;

    async fn poll_once(&self) -> Result<Self::Output, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}
