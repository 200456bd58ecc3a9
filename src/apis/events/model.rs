use crate::{
    hal::{impl_hal_resource, HalResource, Resource},
    transport::RequestOptions,
    Error,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something that happened to a resource, e.g. a `customer_created` or `transfer_completed` topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    pub topic: String,
    #[serde(default)]
    pub resource_id: Option<String>,
}

impl_hal_resource!(Event);

impl Event {
    /// Retrieves the resource this event is about.
    ///
    /// The caller picks the type matching the topic:
    ///
    /// ```rust,no_run
    /// # use dwolla_rust::{Error, apis::{events::Event, transfers::Transfer}};
    /// # async fn run(event: Event) -> Result<(), Error> {
    /// if event.topic.starts_with("transfer_") {
    ///     let transfer: Transfer = event.retrieve_resource().await?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn retrieve_resource<T: HalResource>(&self) -> Result<T, Error> {
        let (transport, link) = self.resource.follow("resource")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}
