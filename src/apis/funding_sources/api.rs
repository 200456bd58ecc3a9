use crate::{
    apis::funding_sources::{FundingSource, FundingSourceRequest},
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla funding sources APIs client.
///
/// Creation and listing happen on the owner, see
/// [`Customer::create_funding_source`](crate::apis::customers::Customer::create_funding_source)
/// and [`Account::create_funding_source`](crate::apis::accounts::Account::create_funding_source).
#[derive(Clone, Debug)]
pub struct FundingSourcesApi {
    transport: Transport,
}

impl FundingSourcesApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(name = "Retrieve Funding Source", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<FundingSource, Error> {
        self.transport
            .fetch(
                &format!("funding-sources/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Update Funding Source", skip(self, req))]
    pub async fn update(
        &self,
        id: &str,
        req: &FundingSourceRequest,
        idempotency_key: Option<&str>,
    ) -> Result<FundingSource, Error> {
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        self.transport
            .submit(
                &format!("funding-sources/{}", encode(id)),
                Some(req),
                &options,
            )
            .await
    }

    /// Soft deletes a funding source.
    #[tracing::instrument(name = "Remove Funding Source", skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        self.transport
            .submit_without_response(
                &format!("funding-sources/{}", encode(id)),
                Some(&FundingSourceRequest {
                    removed: Some(true),
                    ..Default::default()
                }),
                &RequestOptions::default(),
            )
            .await?;

        Ok(())
    }
}
