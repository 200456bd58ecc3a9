use crate::{
    apis::transfers::{Transfer, TransferFailure, TransferRequest},
    hal::Collection,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla transfers APIs client.
#[derive(Clone, Debug)]
pub struct TransfersApi {
    transport: Transport,
}

impl TransfersApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Initiates a transfer.
    ///
    /// Without an idempotency key, a retried call may create a duplicate transfer.
    #[tracing::instrument(
        name = "Create Transfer",
        skip(self, req),
        fields(amount = %req.amount)
    )]
    pub async fn create(
        &self,
        req: &TransferRequest,
        idempotency_key: Option<&str>,
    ) -> Result<Transfer, Error> {
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        self.transport.submit("transfers", Some(req), &options).await
    }

    #[tracing::instrument(name = "Retrieve Transfer", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Transfer, Error> {
        self.transport
            .fetch(
                &format!("transfers/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Retrieve Transfer Failure", skip(self))]
    pub async fn retrieve_failure(&self, id: &str) -> Result<TransferFailure, Error> {
        self.transport
            .fetch(
                &format!("transfers/{}/failure", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    /// Lists the fees of a transfer, embedded under `fees`.
    #[tracing::instrument(name = "List Transfer Fees", skip(self))]
    pub async fn list_fees(&self, id: &str) -> Result<Collection<Transfer>, Error> {
        self.transport
            .fetch(
                &format!("transfers/{}/fees", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
