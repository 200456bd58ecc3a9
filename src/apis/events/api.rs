use crate::{
    apis::events::Event,
    hal::Collection,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla events APIs client.
#[derive(Clone, Debug)]
pub struct EventsApi {
    transport: Transport,
}

impl EventsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists events, most recent first, embedded under `events`.
    #[tracing::instrument(name = "List Events", skip_all)]
    pub async fn list(&self, options: &RequestOptions) -> Result<Collection<Event>, Error> {
        self.transport.fetch("events", options).await
    }

    #[tracing::instrument(name = "Retrieve Event", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Event, Error> {
        self.transport
            .fetch(&format!("events/{}", encode(id)), &RequestOptions::default())
            .await
    }
}
