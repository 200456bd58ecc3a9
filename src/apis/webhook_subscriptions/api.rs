use crate::{
    apis::webhook_subscriptions::{WebhookSubscription, WebhookSubscriptionRequest},
    hal::Collection,
    transport::{RequestOptions, Transport},
    Error,
};
use secrecy::Secret;
use serde_json::json;
use urlencoding::encode;

/// Dwolla webhook subscriptions APIs client.
#[derive(Clone, Debug)]
pub struct WebhookSubscriptionsApi {
    transport: Transport,
}

impl WebhookSubscriptionsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Subscribes `url` to the webhooks of the application.
    #[tracing::instrument(name = "Create Webhook Subscription", skip(self, secret))]
    pub async fn create(
        &self,
        url: &str,
        secret: impl Into<String>,
    ) -> Result<WebhookSubscription, Error> {
        let req = WebhookSubscriptionRequest {
            url: url.to_string(),
            secret: Secret::new(secret.into()),
        };

        self.transport
            .submit("webhook-subscriptions", Some(&req), &RequestOptions::default())
            .await
    }

    /// Lists subscriptions, embedded under `webhook-subscriptions`.
    #[tracing::instrument(name = "List Webhook Subscriptions", skip(self))]
    pub async fn list(&self) -> Result<Collection<WebhookSubscription>, Error> {
        self.transport
            .fetch("webhook-subscriptions", &RequestOptions::default())
            .await
    }

    #[tracing::instrument(name = "Retrieve Webhook Subscription", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<WebhookSubscription, Error> {
        self.transport
            .fetch(
                &format!("webhook-subscriptions/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    /// Pauses or resumes a subscription.
    #[tracing::instrument(name = "Pause Webhook Subscription", skip(self))]
    pub async fn pause(&self, id: &str, paused: bool) -> Result<WebhookSubscription, Error> {
        self.transport
            .submit(
                &format!("webhook-subscriptions/{}", encode(id)),
                Some(&json!({ "paused": paused })),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Remove Webhook Subscription", skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        self.transport
            .delete(
                &format!("webhook-subscriptions/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }
}
