use crate::{
    apis::on_demand_authorizations::OnDemandAuthorization,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla on-demand authorizations APIs client.
#[derive(Clone, Debug)]
pub struct OnDemandAuthorizationsApi {
    transport: Transport,
}

impl OnDemandAuthorizationsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(name = "Create On-Demand Authorization", skip(self))]
    pub async fn create(&self) -> Result<OnDemandAuthorization, Error> {
        self.transport
            .submit(
                "on-demand-authorizations",
                None::<&()>,
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Retrieve On-Demand Authorization", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<OnDemandAuthorization, Error> {
        self.transport
            .fetch(
                &format!("on-demand-authorizations/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
