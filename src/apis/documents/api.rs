use crate::{
    apis::documents::Document,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla documents APIs client.
///
/// Documents are uploaded through their owner, see
/// [`Customer::create_document`](crate::apis::customers::Customer::create_document).
#[derive(Clone, Debug)]
pub struct DocumentsApi {
    transport: Transport,
}

impl DocumentsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[tracing::instrument(name = "Retrieve Document", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Document, Error> {
        self.transport
            .fetch(
                &format!("documents/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
