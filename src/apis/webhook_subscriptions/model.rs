use crate::{
    hal::{impl_hal_resource, Collection, Resource},
    transport::RequestOptions,
    Error,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};

/// An endpoint of the application receiving webhooks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebhookSubscription {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl_hal_resource!(WebhookSubscription);

/// A webhook sent for an event, with every delivery attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub attempts: Vec<WebhookAttempt>,
}

impl_hal_resource!(Webhook);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebhookAttempt {
    pub id: String,
    #[serde(default)]
    pub request: Option<WebhookExchange>,
    #[serde(default)]
    pub response: Option<WebhookExchange>,
}

/// One side of a delivery attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookExchange {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Body of a subscription creation.
///
/// The secret signs every webhook sent to `url`; it is redacted in `Debug`.
#[derive(Serialize, Debug, Clone)]
pub struct WebhookSubscriptionRequest {
    pub url: String,
    #[serde(serialize_with = "serialize_secret")]
    pub secret: Secret<String>,
}

fn serialize_secret<S: Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl WebhookSubscription {
    /// Lists the webhooks sent to this subscription, embedded under `webhooks`.
    pub async fn list_webhooks(
        &self,
        options: &RequestOptions,
    ) -> Result<Collection<Webhook>, Error> {
        let (transport, link) = self.resource.follow("webhooks")?;

        transport.fetch(&link.href, options).await
    }
}
