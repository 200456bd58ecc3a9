use crate::{
    apis::beneficial_owners::{BeneficialOwner, BeneficialOwnerRequest},
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla beneficial owners APIs client.
///
/// Owners are created and listed through their business customer.
#[derive(Clone, Debug)]
pub struct BeneficialOwnersApi {
    transport: Transport,
}

impl BeneficialOwnersApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(name = "Retrieve Beneficial Owner", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<BeneficialOwner, Error> {
        self.transport
            .fetch(
                &format!("beneficial-owners/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Update Beneficial Owner", skip(self, req))]
    pub async fn update(
        &self,
        id: &str,
        req: &BeneficialOwnerRequest,
    ) -> Result<BeneficialOwner, Error> {
        self.transport
            .submit(
                &format!("beneficial-owners/{}", encode(id)),
                Some(req),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Remove Beneficial Owner", skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        self.transport
            .delete(
                &format!("beneficial-owners/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
