use crate::{
    apis::kba::Kba,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla knowledge based authentication APIs client.
///
/// Sessions are started with [`Customer::initiate_kba`](crate::apis::customers::Customer::initiate_kba).
#[derive(Clone, Debug)]
pub struct KbaApi {
    transport: Transport,
}

impl KbaApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(name = "Retrieve KBA", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Kba, Error> {
        self.transport
            .fetch(&format!("kba/{}", encode(id)), &RequestOptions::default())
            .await
    }
}
