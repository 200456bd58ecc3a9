use crate::{
    apis::mass_payments::{MassPayment, MassPaymentRequest, MassPaymentStatus, StatusUpdate},
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla mass payments APIs client.
#[derive(Clone, Debug)]
pub struct MassPaymentsApi {
    transport: Transport,
}

impl MassPaymentsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(
        name = "Create Mass Payment",
        skip(self, req),
        fields(items = req.items.len())
    )]
    pub async fn create(
        &self,
        req: &MassPaymentRequest,
        idempotency_key: Option<&str>,
    ) -> Result<MassPayment, Error> {
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        self.transport
            .submit("mass-payments", Some(req), &options)
            .await
    }

    #[tracing::instrument(name = "Retrieve Mass Payment", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<MassPayment, Error> {
        self.transport
            .fetch(
                &format!("mass-payments/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    /// Processes (`Pending`) or cancels (`Cancelled`) a deferred mass payment.
    #[tracing::instrument(name = "Update Mass Payment", skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        status: MassPaymentStatus,
    ) -> Result<MassPayment, Error> {
        self.transport
            .submit(
                &format!("mass-payments/{}", encode(id)),
                Some(&StatusUpdate { status }),
                &RequestOptions::default(),
            )
            .await
    }
}
