//! The request/response lifecycle shared by every Dwolla API call.
//!
//! [`Transport`] exposes four verbs (fetch, submit, upload, delete). Each of them:
//!
//! 1. resolves the target against the configured [`Environment`],
//! 2. sends the request through the middleware stack, which injects a valid bearer token
//!    and classifies failed responses into [`Error`]s,
//! 3. replays the request once, after forcing a new token, if the server rejected the token as expired,
//! 4. decodes the body and attaches the transport to the decoded resource.

use crate::{
    authenticator::Authenticator,
    client::Environment,
    common::{HAL_CONTENT_TYPE, IDEMPOTENCY_KEY_HEADER, TRY_AGAIN_LATER_CODE},
    error::{Error, HalError},
    hal::{HalResource, Links, Resource},
};
use reqwest::{
    header::{HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, LOCATION},
    multipart::{Form, Part},
    Method, Request, Response, StatusCode,
};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
    time::Duration,
};
use tokio::sync::Mutex;

/// Per-call request options.
///
/// ```rust
/// # use dwolla_rust::transport::RequestOptions;
/// # use std::time::Duration;
/// let options = RequestOptions::new()
///     .query("limit", "25")
///     .idempotency_key("4c1b5d1e-8a47-4c5a-9f0a-0cd3e4a0b7f1")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a header. Protocol headers (`Accept`, `Authorization`, ...) take precedence.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the `Idempotency-Key` header, used by the server to deduplicate creations.
    pub fn idempotency_key(self, key: impl Into<String>) -> Self {
        self.header(IDEMPOTENCY_KEY_HEADER, key)
    }

    /// Sets a deadline for the HTTP exchange. Expiry surfaces as [`Error::HttpError`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `Idempotency-Key` header only if `key` is `Some`.
    pub(crate) fn maybe_idempotency_key(self, key: Option<&str>) -> Self {
        match key {
            Some(key) => self.idempotency_key(key),
            None => self,
        }
    }
}

/// Cheaply cloneable handle to the HTTP stack of a [`DwollaClient`](crate::DwollaClient).
///
/// Every resource returned by this crate holds a clone, so it can follow its own links.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

pub(crate) struct TransportInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) http: reqwest::Client,
    pub(crate) authenticator: Authenticator,
    pub(crate) environment: Environment,
    pub(crate) root: Mutex<Option<Links>>,
}

impl Debug for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("environment", &self.inner.environment)
            .finish_non_exhaustive()
    }
}

/// Request body of a single attempt. Rebuilt from owned data for the replay.
enum Body<'a> {
    Empty,
    Json(Vec<u8>),
    Multipart {
        document_type: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    },
}

impl Transport {
    pub(crate) fn new(
        client: ClientWithMiddleware,
        http: reqwest::Client,
        authenticator: Authenticator,
        environment: Environment,
    ) -> Self {
        Self {
            inner: Arc::new(TransportInner {
                client,
                http,
                authenticator,
                environment,
                root: Mutex::new(None),
            }),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.inner.environment
    }

    /// Issues a `GET` and decodes the body into `T`.
    ///
    /// A `202 Accepted` answer carrying a `TryAgainLater` code is reported as
    /// [`Error::TryAgainLater`], so callers can poll.
    #[tracing::instrument(name = "Fetch", level = "debug", skip(self, options))]
    pub async fn fetch<T: HalResource>(
        &self,
        target: &str,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let res = self
            .execute(Method::GET, target, options, &Body::Empty)
            .await?;

        let status = res.status();
        let bytes = res.bytes().await?;

        if status == StatusCode::ACCEPTED {
            if let Ok(mut pending) = serde_json::from_slice::<HalError>(&bytes) {
                if pending.code == TRY_AGAIN_LATER_CODE {
                    pending.status = Some(status.as_u16());
                    return Err(Error::TryAgainLater(pending));
                }
            }
        }

        self.decode(&bytes)
    }

    /// Issues a `POST` with an optional JSON body and decodes the result into `T`.
    ///
    /// If the server answers with a `Location` header, the resource at that address is
    /// fetched and returned instead of the response body.
    #[tracing::instrument(name = "Submit", level = "debug", skip(self, body, options))]
    pub async fn submit<T, B>(
        &self,
        target: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T, Error>
    where
        T: HalResource,
        B: Serialize + ?Sized,
    {
        let body = json_body(body)?;
        let res = self.execute(Method::POST, target, options, &body).await?;

        self.materialize(res).await
    }

    /// Issues a `POST` and discards the response body.
    ///
    /// Returns the `Location` header of the response, if any, without following it.
    #[tracing::instrument(name = "Submit", level = "debug", skip(self, body, options))]
    pub async fn submit_without_response<B>(
        &self,
        target: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Option<String>, Error>
    where
        B: Serialize + ?Sized,
    {
        let body = json_body(body)?;
        let res = self.execute(Method::POST, target, options, &body).await?;

        Ok(location(&res))
    }

    /// Uploads a file as a multipart `POST`, with the same result handling as [`Transport::submit`].
    #[tracing::instrument(name = "Upload", level = "debug", skip(self, content, options))]
    pub async fn upload<T: HalResource>(
        &self,
        target: &str,
        document_type: &str,
        file_name: &str,
        content: &[u8],
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let body = Body::Multipart {
            document_type,
            file_name,
            content,
        };
        let res = self.execute(Method::POST, target, options, &body).await?;

        self.materialize(res).await
    }

    /// Issues a `DELETE`. The response body, if any, is ignored.
    #[tracing::instrument(name = "Delete", level = "debug", skip(self, options))]
    pub async fn delete(&self, target: &str, options: &RequestOptions) -> Result<(), Error> {
        self.execute(Method::DELETE, target, options, &Body::Empty)
            .await?;

        Ok(())
    }

    /// Returns the root resource, fetching it on first use.
    ///
    /// The root is cached for the lifetime of the client; see [`Transport::set_root`].
    pub async fn root(&self) -> Result<Resource, Error> {
        let mut cached = self.inner.root.lock().await;

        let links = match &*cached {
            Some(links) => links.clone(),
            None => {
                let root: Resource = self.fetch("", &RequestOptions::default()).await?;
                let links = root.links().clone();
                *cached = Some(links.clone());
                links
            }
        };

        let mut root = Resource::new(links);
        root.attach(self);
        Ok(root)
    }

    /// Pre-seeds the root cache, so that no root request is ever sent.
    pub async fn set_root(&self, root: Resource) {
        *self.inner.root.lock().await = Some(root.links().clone());
    }

    /// Sends a request, replaying it once if the access token turned out to be expired.
    async fn execute(
        &self,
        method: Method,
        target: &str,
        options: &RequestOptions,
        body: &Body<'_>,
    ) -> Result<Response, Error> {
        let mut refreshed = false;
        loop {
            let req = self.build_request(method.clone(), target, options, body)?;

            match self.inner.client.execute(req).await.map_err(Error::from) {
                Err(e) if e.is_expired_token() && !refreshed => {
                    tracing::info!("Access token expired, requesting a new one");
                    self.inner.authenticator.request_token().await?;
                    refreshed = true;
                }
                res => return res,
            }
        }
    }

    fn build_request(
        &self,
        method: Method,
        target: &str,
        options: &RequestOptions,
        body: &Body<'_>,
    ) -> Result<Request, Error> {
        let mut builder = self
            .inner
            .http
            .request(method, self.inner.environment.resolve(target));

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let is_json = matches!(body, Body::Json(_));
        builder = match body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes.clone()),
            Body::Multipart {
                document_type,
                file_name,
                content,
            } => builder
                .header(CACHE_CONTROL, "no-cache")
                .multipart(
                    Form::new()
                        .text("documentType", document_type.to_string())
                        .part(
                            "file",
                            Part::bytes(content.to_vec()).file_name(file_name.to_string()),
                        ),
                ),
        };

        let mut req = builder.build()?;
        let headers = req.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(HAL_CONTENT_TYPE));
        if is_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(HAL_CONTENT_TYPE));
        }

        Ok(req)
    }

    /// Decodes a creation response, following its `Location` header if present.
    async fn materialize<T: HalResource>(&self, res: Response) -> Result<T, Error> {
        if let Some(location) = location(&res) {
            tracing::debug!("Following Location header to {}", location);
            return self.fetch(&location, &RequestOptions::default()).await;
        }

        let bytes = res.bytes().await?;
        self.decode(&bytes)
    }

    fn decode<T: HalResource>(&self, bytes: &[u8]) -> Result<T, Error> {
        let mut value: T = serde_json::from_slice(bytes)?;
        value.attach(self);
        Ok(value)
    }
}

fn json_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Body<'static>, Error> {
    Ok(match body {
        Some(body) => Body::Json(serde_json::to_vec(body)?),
        None => Body::Empty,
    })
}

fn location(res: &Response) -> Option<String> {
    res.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
