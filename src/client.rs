//! Module containing the main Dwolla API client.

use crate::{
    apis::{
        accounts::AccountsApi,
        auth::{AuthApi, Credentials},
        beneficial_owners::BeneficialOwnersApi,
        business_classifications::BusinessClassificationsApi,
        client_tokens::{ClientToken, ClientTokenRequest},
        customers::{Customer, CustomersApi},
        documents::DocumentsApi,
        events::EventsApi,
        funding_sources::FundingSourcesApi,
        kba::KbaApi,
        mass_payments::MassPaymentsApi,
        on_demand_authorizations::OnDemandAuthorizationsApi,
        transfers::TransfersApi,
        webhook_subscriptions::WebhookSubscriptionsApi,
    },
    authenticator::Authenticator,
    common::{
        DEFAULT_PRODUCTION_API_URL, DEFAULT_PRODUCTION_AUTH_URL, DEFAULT_SANDBOX_API_URL,
        DEFAULT_SANDBOX_AUTH_URL,
    },
    hal::{HalResource, Link, Links, Resource},
    middlewares::{
        authentication::AuthenticationMiddleware,
        error_handling::ErrorHandlingMiddleware,
        inject_user_agent::InjectUserAgentMiddleware,
        retry_idempotent::{DynRetryPolicy, RetryIdempotentMiddleware},
    },
    transport::{RequestOptions, Transport},
    Error,
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use retry_policies::RetryPolicy;
use std::sync::Arc;

/// Client for the Dwolla APIs.
///
/// Cloning is cheap: all clones share the same token cache and root cache.
#[derive(Debug, Clone)]
pub struct DwollaClient {
    /// Access token management.
    pub auth: AuthApi,
    /// Master account of the application.
    pub accounts: AccountsApi,
    /// Customers.
    pub customers: CustomersApi,
    /// Funding sources, by id.
    pub funding_sources: FundingSourcesApi,
    /// Transfers.
    pub transfers: TransfersApi,
    /// Mass payments.
    pub mass_payments: MassPaymentsApi,
    /// Verification documents, by id.
    pub documents: DocumentsApi,
    /// Beneficial owners of business customers, by id.
    pub beneficial_owners: BeneficialOwnersApi,
    /// Knowledge based authentication sessions.
    pub kba: KbaApi,
    pub business_classifications: BusinessClassificationsApi,
    pub events: EventsApi,
    pub webhook_subscriptions: WebhookSubscriptionsApi,
    pub on_demand_authorizations: OnDemandAuthorizationsApi,
    transport: Transport,
}

impl DwollaClient {
    /// Builds a new [`DwollaClient`](crate::client::DwollaClient) with the default configuration.
    pub fn new(credentials: Credentials) -> DwollaClient {
        DwollaClientBuilder::new(credentials).build()
    }

    /// Returns a new builder to configure a new [`DwollaClient`](crate::client::DwollaClient).
    pub fn builder(credentials: Credentials) -> DwollaClientBuilder {
        DwollaClientBuilder::new(credentials)
    }

    /// The transport shared by all the APIs of this client.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Returns the root resource, fetched once and cached for the lifetime of this client.
    pub async fn root(&self) -> Result<Resource, Error> {
        self.transport.root().await
    }

    /// Pre-seeds the root cache. No root request will be sent afterwards.
    pub async fn set_root(&self, root: Resource) {
        self.transport.set_root(root).await
    }

    /// Creates a general use client token for the given action (e.g. `customer.update`),
    /// optionally scoped to a customer.
    #[tracing::instrument(name = "Create Client Token", skip(self, customer))]
    pub async fn create_client_token(
        &self,
        action: &str,
        customer: Option<&Customer>,
    ) -> Result<ClientToken, Error> {
        let mut links = Links::default();
        if let Some(customer) = customer {
            let href = customer.link("self")?.href.clone();
            links.insert("customer", Link::new(href));
        }

        let body = ClientTokenRequest {
            resource: Resource::new(links),
            action: action.to_string(),
        };

        self.transport
            .submit("client-tokens", Some(&body), &RequestOptions::default())
            .await
    }

    /// Asks the sandbox to process all pending bank transfers.
    ///
    /// Only available in the sandbox environment.
    #[tracing::instrument(name = "Sandbox Simulations", skip(self))]
    pub async fn sandbox_simulations(&self) -> Result<(), Error> {
        self.transport
            .submit_without_response("sandbox-simulations", None::<&()>, &RequestOptions::default())
            .await?;

        Ok(())
    }
}

/// Dwolla environment a client connects to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// `https://api.dwolla.com`
    Production,
    /// `https://api-sandbox.dwolla.com`
    Sandbox,
    /// Custom origins, e.g. a local mock of the APIs.
    Custom { api_url: Url, auth_url: Url },
}

impl Environment {
    /// Builds a custom environment where every origin points to `url`.
    pub fn from_single_url(url: &Url) -> Self {
        Self::Custom {
            api_url: url.clone(),
            auth_url: url.clone(),
        }
    }

    /// Origin of the APIs, without trailing slash.
    pub fn api_url(&self) -> &str {
        match self {
            Environment::Production => DEFAULT_PRODUCTION_API_URL,
            Environment::Sandbox => DEFAULT_SANDBOX_API_URL,
            Environment::Custom { api_url, .. } => api_url.as_str().trim_end_matches('/'),
        }
    }

    /// Address of the OAuth authorization page, for flows that involve a user.
    pub fn auth_url(&self) -> &str {
        match self {
            Environment::Production => DEFAULT_PRODUCTION_AUTH_URL,
            Environment::Sandbox => DEFAULT_SANDBOX_AUTH_URL,
            Environment::Custom { auth_url, .. } => auth_url.as_str(),
        }
    }

    /// Address of the client credentials token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/token", self.api_url())
    }

    /// Resolves a request target into a full address.
    ///
    /// Link targets already pointing at the API origin are used as they are; relative
    /// paths are composed onto it. The empty target addresses the root.
    pub fn resolve(&self, target: &str) -> String {
        let origin = self.api_url();
        if target.starts_with(origin) {
            target.to_string()
        } else {
            format!("{}/{}", origin, target.trim_start_matches('/'))
        }
    }
}

/// Builder for a [`DwollaClient`](crate::client::DwollaClient).
#[derive(Debug)]
pub struct DwollaClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    environment: Environment,
    credentials: Credentials,
}

impl DwollaClientBuilder {
    /// Creates a new builder to configure a [`DwollaClient`](crate::client::DwollaClient).
    ///
    /// Defaults to the production environment with automatic retries disabled.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: None,
            environment: Environment::Production,
            credentials,
        }
    }

    /// Consumes the builder and builds a new [`DwollaClient`](crate::client::DwollaClient).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> DwollaClient {
        // Token requests carry their own error format, so they skip error handling
        let authenticator = Authenticator::new(
            reqwest_middleware::ClientBuilder::new(self.client.clone())
                .with(TracingMiddleware::default())
                .with(InjectUserAgentMiddleware::new())
                .build(),
            self.environment.token_url(),
            self.credentials,
        );

        let transport = Transport::new(
            build_client_with_middleware(
                self.client.clone(),
                self.retry_policy,
                AuthenticationMiddleware {
                    authenticator: authenticator.clone(),
                },
            ),
            self.client,
            authenticator.clone(),
            self.environment,
        );

        DwollaClient {
            auth: AuthApi::new(authenticator),
            accounts: AccountsApi::new(transport.clone()),
            customers: CustomersApi::new(transport.clone()),
            funding_sources: FundingSourcesApi::new(transport.clone()),
            transfers: TransfersApi::new(transport.clone()),
            mass_payments: MassPaymentsApi::new(transport.clone()),
            documents: DocumentsApi::new(transport.clone()),
            beneficial_owners: BeneficialOwnersApi::new(transport.clone()),
            kba: KbaApi::new(transport.clone()),
            business_classifications: BusinessClassificationsApi::new(transport.clone()),
            events: EventsApi::new(transport.clone()),
            webhook_subscriptions: WebhookSubscriptionsApi::new(transport.clone()),
            on_demand_authorizations: OnDemandAuthorizationsApi::new(transport.clone()),
            transport,
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a [`RetryPolicy`](retry_policies::RetryPolicy) to retry transient failures of
    /// idempotent requests.
    ///
    /// Disabled by default. To disable it again, use `None`.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the environment to connect to.
    ///
    /// Defaults to [`Environment::Production`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    auth_middleware: AuthenticationMiddleware,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectUserAgentMiddleware::new())
        .with(ErrorHandlingMiddleware);

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryIdempotentMiddleware::new(retry_policy));
    }

    builder.with(auth_middleware).build()
}
