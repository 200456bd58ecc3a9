use crate::{
    apis::{
        documents::{Document, DocumentRequest},
        shared::{Address, Passport},
    },
    hal::{impl_hal_resource, Collection, Resource},
    transport::RequestOptions,
    Error,
};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BeneficialOwnerStatus {
    Incomplete,
    Document,
    Verified,
    #[serde(other)]
    Unknown,
}

/// A person owning 25% or more of a business customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeneficialOwner {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub passport: Option<Passport>,
    #[serde(default)]
    pub verification_status: Option<BeneficialOwnerStatus>,
}

impl_hal_resource!(BeneficialOwner);

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct BeneficialOwnerRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub address: Address,
    /// Full SSN, for US owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option), default)]
    pub ssn: Option<String>,
    /// Required for non-US owners without an SSN.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option), default)]
    pub passport: Option<Passport>,
}

/// Certification status of the beneficial owners of a business customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BeneficialOwnership {
    #[serde(flatten)]
    pub resource: Resource,
    pub status: String,
}

impl_hal_resource!(BeneficialOwnership);

impl BeneficialOwner {
    #[tracing::instrument(name = "Update Beneficial Owner", skip(self, req), fields(id = %self.id))]
    pub async fn update(&self, req: &BeneficialOwnerRequest) -> Result<BeneficialOwner, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .submit(&link.href, Some(req), &RequestOptions::default())
            .await
    }

    #[tracing::instrument(name = "Remove Beneficial Owner", skip(self), fields(id = %self.id))]
    pub async fn remove(&self) -> Result<(), Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport.delete(&link.href, &RequestOptions::default()).await
    }

    /// Uploads an identity document for an owner in `document` status.
    #[tracing::instrument(
        name = "Create Beneficial Owner Document",
        skip_all,
        fields(id = %self.id)
    )]
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

    pub async fn list_documents(&self) -> Result<Collection<Document>, Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .fetch(
                &format!("{}/documents", link.href),
                &RequestOptions::default(),
            )
            .await
    }
}
