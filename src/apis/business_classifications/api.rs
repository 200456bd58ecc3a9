use crate::{
    apis::business_classifications::BusinessClassification,
    hal::Collection,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla business classifications APIs client.
#[derive(Clone, Debug)]
pub struct BusinessClassificationsApi {
    transport: Transport,
}

impl BusinessClassificationsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists classifications, embedded under `business-classifications`.
    #[tracing::instrument(name = "List Business Classifications", skip_all)]
    pub async fn list(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<BusinessClassification>, Error> {
        self.transport
            .fetch("business-classifications", options)
            .await
    }

    #[tracing::instrument(name = "Retrieve Business Classification", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<BusinessClassification, Error> {
        self.transport
            .fetch(
                &format!("business-classifications/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
