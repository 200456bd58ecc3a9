use crate::{
    apis::{
        beneficial_owners::{BeneficialOwner, BeneficialOwnerRequest, BeneficialOwnership},
        documents::{Document, DocumentRequest},
        funding_sources::{FundingSource, FundingSourceRequest},
        kba::Kba,
        mass_payments::MassPayment,
        shared::{Address, Passport, ResourceToken},
        transfers::Transfer,
    },
    hal::{impl_hal_resource, Collection, HalResource, Resource},
    transport::RequestOptions,
    Error,
};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    Personal,
    Business,
    ReceiveOnly,
    Unverified,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStatus {
    Unverified,
    Retry,
    Document,
    Verified,
    Suspended,
    Deactivated,
    Reactivated,
    #[serde(other)]
    Unknown,
}

/// Controller of a business customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<Passport>,
}

/// A Dwolla customer.
///
/// What can be done with a customer depends on its verification state, which the
/// server communicates through the links it returns. For example a customer in
/// `retry` status carries a `retry-verification` link, checked by
/// [`needs_retry_verification`](Customer::needs_retry_verification).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "type", default)]
    pub customer_type: Option<CustomerType>,
    #[serde(default)]
    pub status: Option<CustomerStatus>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub controller: Option<Controller>,
}

impl_hal_resource!(Customer);

/// Body of a customer creation or update.
///
/// Only the fields that are set are sent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option), default)]
pub struct CustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doing_business_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<Controller>,
}

impl CustomerRequest {
    fn with_status(status: CustomerStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Customer {
    /// Updates this customer, returning its new state.
    #[tracing::instrument(name = "Update Customer", skip(self, req), fields(id = %self.id))]
    pub async fn update(
        &self,
        req: &CustomerRequest,
        idempotency_key: Option<&str>,
    ) -> Result<Customer, Error> {
        let (transport, link) = self.resource.follow("self")?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport.submit(&link.href, Some(req), &options).await
    }

    #[tracing::instrument(name = "Deactivate Customer", skip(self), fields(id = %self.id))]
    pub async fn deactivate(&self) -> Result<Customer, Error> {
        self.change_status("deactivate", CustomerStatus::Deactivated)
            .await
    }

    #[tracing::instrument(name = "Reactivate Customer", skip(self), fields(id = %self.id))]
    pub async fn reactivate(&self) -> Result<Customer, Error> {
        self.change_status("reactivate", CustomerStatus::Reactivated)
            .await
    }

    #[tracing::instrument(name = "Suspend Customer", skip(self), fields(id = %self.id))]
    pub async fn suspend(&self) -> Result<Customer, Error> {
        self.change_status("suspend", CustomerStatus::Suspended)
            .await
    }

    async fn change_status(
        &self,
        relation: &str,
        status: CustomerStatus,
    ) -> Result<Customer, Error> {
        let (transport, link) = self.resource.follow(relation)?;

        transport
            .submit(
                &link.href,
                Some(&CustomerRequest::with_status(status)),
                &RequestOptions::default(),
            )
            .await
    }

    /// Certifies that the beneficial owners of this business customer are complete and correct.
    #[tracing::instrument(name = "Certify Beneficial Ownership", skip(self), fields(id = %self.id))]
    pub async fn certify_beneficial_ownership(&self) -> Result<(), Error> {
        let (transport, link) = self.resource.follow("certify-beneficial-ownership")?;

        transport
            .submit_without_response(
                &link.href,
                Some(&serde_json::json!({ "status": "certified" })),
                &RequestOptions::default(),
            )
            .await?;

        Ok(())
    }

    pub async fn retrieve_beneficial_ownership(&self) -> Result<BeneficialOwnership, Error> {
        // Only business customers can have beneficial owners
        self.link("beneficial-owners")?;
        let (transport, link) = self.resource.follow("self")?;

        transport
            .fetch(
                &format!("{}/beneficial-ownership", link.href),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Create Beneficial Owner", skip_all, fields(id = %self.id))]
    pub async fn create_beneficial_owner(
        &self,
        req: &BeneficialOwnerRequest,
    ) -> Result<BeneficialOwner, Error> {
        let (transport, link) = self.resource.follow("beneficial-owners")?;

        transport
            .submit(&link.href, Some(req), &RequestOptions::default())
            .await
    }

    /// Lists beneficial owners, embedded under `beneficial-owners`.
    pub async fn list_beneficial_owners(&self) -> Result<Collection<BeneficialOwner>, Error> {
        let (transport, link) = self.resource.follow("beneficial-owners")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }

    /// Uploads a verification document for this customer.
    #[tracing::instrument(name = "Create Document", skip_all, fields(id = %self.id))]
    pub async fn create_document(&self, req: &DocumentRequest) -> Result<Document, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .upload(
                &format!("{}/documents", link.href),
                req.document_type.as_str(),
                &req.file_name,
                &req.content,
                &RequestOptions::default(),
            )
            .await
    }

    /// Lists documents, embedded under `documents`.
    pub async fn list_documents(&self) -> Result<Collection<Document>, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .fetch(
                &format!("{}/documents", link.href),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Create Customer Funding Source", skip_all, fields(id = %self.id))]
    pub async fn create_funding_source(
        &self,
        req: &FundingSourceRequest,
        idempotency_key: Option<&str>,
    ) -> Result<FundingSource, Error> {
        let (transport, link) = self.resource.follow("funding-sources")?;
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        transport.submit(&link.href, Some(req), &options).await
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

    /// Creates a token for dwolla.js to add a funding source to this customer.
    pub async fn create_funding_source_token(&self) -> Result<ResourceToken, Error> {
        self.create_token("funding-source-token").await
    }

    /// Creates a token for dwolla.js instant account verification.
    pub async fn create_iav_token(&self) -> Result<ResourceToken, Error> {
        self.create_token("iav-token").await
    }

    async fn create_token(&self, suffix: &str) -> Result<ResourceToken, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .submit(
                &format!("{}/{}", link.href, suffix),
                None::<&()>,
                &RequestOptions::default(),
            )
            .await
    }

    /// Starts a knowledge based authentication session.
    #[tracing::instrument(name = "Initiate KBA", skip(self), fields(id = %self.id))]
    pub async fn initiate_kba(&self) -> Result<Kba, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .submit(
                &format!("{}/kba", link.href),
                None::<&()>,
                &RequestOptions::default(),
            )
            .await
    }

    /// Lists mass payments, embedded under `mass-payments`.
    pub async fn list_mass_payments(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<MassPayment>, Error> {
        let (transport, link) = self.resource.follow("mass-payments")?;

        transport.fetch(&link.href, options).await
    }

    /// Lists transfers, embedded under `transfers`.
    pub async fn list_transfers(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<Transfer>, Error> {
        let (transport, link) = self.resource.follow("transfers")?;

        transport.fetch(&link.href, options).await
    }

    pub fn can_send(&self) -> bool {
        self.has_link("send")
    }

    pub fn can_receive(&self) -> bool {
        self.has_link("receive")
    }

    pub fn needs_retry_verification(&self) -> bool {
        self.has_link("retry-verification")
    }

    /// Returns `true` if the customer (or the controller of a business) must upload an identity document.
    pub fn needs_document_verification(&self) -> bool {
        self.has_link("verify-with-document")
    }

    pub fn needs_business_document_verification(&self) -> bool {
        self.has_link("verify-business-with-document")
    }

    pub fn needs_controller_and_business_document_verification(&self) -> bool {
        self.has_link("verify-controller-and-business-with-document")
    }

    pub fn needs_beneficial_owners_verification(&self) -> bool {
        self.has_link("verify-beneficial-owners")
    }
}
