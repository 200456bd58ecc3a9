use crate::{
    apis::{
        funding_sources::{FundingSource, FundingSourceRequest},
        mass_payments::MassPayment,
        transfers::Transfer,
    },
    hal::{impl_hal_resource, Collection, Resource},
    transport::RequestOptions,
    Error,
};
use serde::{Deserialize, Serialize};

/// The master Dwolla account of the application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timezone_offset: Option<f32>,
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

impl_hal_resource!(Account);

impl Account {
    /// Adds a bank funding source to the account.
    #[tracing::instrument(name = "Create Account Funding Source", skip_all, fields(id = %self.id))]
    pub async fn create_funding_source(
        &self,
        req: &FundingSourceRequest,
        idempotency_key: Option<&str>,
    ) -> Result<FundingSource, Error> {
        let transport = self.resource.transport()?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport
            .submit("funding-sources", Some(req), &options)
            .await
    }

    /// Lists funding sources, embedded under `funding-sources`.
    ///
    /// `removed` filters on the removal flag; `None` returns all of them.
    pub async fn list_funding_sources(
        &self,
        removed: Option<bool>,
    ) -> Result<Collection<FundingSource>, Error> {
        let (transport, link) = self.resource.follow("funding-sources")?;
        let mut options = RequestOptions::new();
        if let Some(removed) = removed {
            options = options.query("removed", removed.to_string());
        }

        transport.fetch(&link.href, &options).await
    }

    /// Lists mass payments, embedded under `mass-payments`.
    pub async fn list_mass_payments(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<MassPayment>, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .fetch(&format!("{}/mass-payments", link.href), options)
            .await
    }

    /// Lists and searches transfers, embedded under `transfers`.
    pub async fn list_transfers(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<Transfer>, Error> {
        let (transport, link) = self.resource.follow("transfers")?;

        transport.fetch(&link.href, options).await
    }
}
