use crate::{
    apis::auth::{AccessToken, Credentials},
    common::{FORM_CONTENT_TYPE, HAL_CONTENT_TYPE, UNKNOWN_ERROR_CODE},
    error::Error,
};
use anyhow::anyhow;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest_middleware::ClientWithMiddleware;
use tokio::sync::{mpsc, oneshot};

type Reply = oneshot::Sender<Result<AccessToken, Error>>;

enum Command {
    /// Reuse the cached token if still valid, otherwise request a new one.
    GetAccessToken(Reply),
    /// Always request a new token.
    RequestToken(Reply),
}

/// Manager for credentials and access tokens.
///
/// The token is owned by a background task: every call is a message to that task,
/// so refreshes never overlap and callers queued behind a refresh get the new token.
#[derive(Debug, Clone)]
pub struct Authenticator {
    tx: mpsc::UnboundedSender<Command>,
}

impl Authenticator {
    /// Starts a new authenticator exchanging `credentials` at `token_url`.
    pub fn new(client: ClientWithMiddleware, token_url: String, credentials: Credentials) -> Self {
        let state = AuthenticatorState {
            client,
            token_url,
            credentials,
            access_token: None,
        };

        // Spawn a long running task which will running forever until the authenticator is dropped
        let (tx, rx) = mpsc::unbounded_channel();
        #[cfg(test)]
        tests::mocked_time::spawn(async move {
            // We need to propagate the mocked time task-local in order to control time in the tests
            process_loop(state, rx).await;
        });
        #[cfg(not(test))]
        tokio::spawn(async move {
            process_loop(state, rx).await;
        });

        Self { tx }
    }

    /// Returns the cached access token, or requests a new one if there is none or it has expired.
    ///
    /// Concurrent calls are batched into one single request to the token endpoint.
    pub async fn get_access_token(&self) -> Result<AccessToken, Error> {
        self.send(Command::GetAccessToken).await
    }

    /// Requests a new access token, replacing the cached one on success.
    pub async fn request_token(&self) -> Result<AccessToken, Error> {
        self.send(Command::RequestToken).await
    }

    async fn send(&self, command: impl FnOnce(Reply) -> Command) -> Result<AccessToken, Error> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(command(tx))
            .map_err(|_| Error::Other(anyhow!("Authenticator task is not running")))?;

        rx.await
            .map_err(|_| Error::Other(anyhow!("Authenticator task dropped the request")))?
    }
}

/// Internal state of the authenticator.
struct AuthenticatorState {
    client: ClientWithMiddleware,
    token_url: String,
    credentials: Credentials,
    access_token: Option<AccessToken>,
}

async fn process_loop(mut state: AuthenticatorState, mut rx: mpsc::UnboundedReceiver<Command>) {
    // Infinite loop waiting for commands from the main client
    while let Some(command) = rx.recv().await {
        let (reply, res) = match command {
            Command::GetAccessToken(reply) => (reply, process_get_access_token(&mut state).await),
            Command::RequestToken(reply) => (reply, process_request_token(&mut state).await),
        };

        if reply.send(res).is_err() {
            tracing::warn!("Receiver dropped before the reply");
        }
    }
}

#[tracing::instrument(name = "Ensure Token", level = "debug", skip(state))]
async fn process_get_access_token(state: &mut AuthenticatorState) -> Result<AccessToken, Error> {
    // If we are already authenticated, do nothing
    if let Some(token) = &state.access_token {
        if !token.is_expired_at(now()) {
            tracing::debug!("Reusing existing access token");
            return Ok(token.clone());
        }
    }

    process_request_token(state).await
}

#[tracing::instrument(name = "Request Token", level = "debug", skip(state))]
async fn process_request_token(state: &mut AuthenticatorState) -> Result<AccessToken, Error> {
    let response = state
        .client
        .post(&state.token_url)
        .basic_auth(
            &state.credentials.key,
            Some(state.credentials.secret.expose_secret()),
        )
        .header(ACCEPT, HAL_CONTENT_TYPE)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = response.status();
    let bytes = response.bytes().await?;
    let res: RawTokenResponse = match serde_json::from_slice(&bytes) {
        Ok(res) => res,
        Err(_) if !status.is_success() => {
            return Err(Error::Authentication {
                code: UNKNOWN_ERROR_CODE.to_string(),
                description: format!("Token endpoint answered with HTTP {}", status),
            })
        }
        Err(e) => return Err(e.into()),
    };

    // An error code in the body wins over the status code, and leaves the cached token as is
    if let Some(code) = res.error.filter(|code| !code.is_empty()) {
        tracing::debug!("Token request rejected: {}", code);
        return Err(Error::Authentication {
            code,
            description: res.error_description.unwrap_or_default(),
        });
    }

    let (access_token, token_type) = match (res.access_token, res.token_type) {
        (Some(access_token), Some(token_type)) => (access_token, token_type),
        _ => {
            return Err(Error::Authentication {
                code: UNKNOWN_ERROR_CODE.to_string(),
                description: format!("Malformed token response (HTTP {})", status),
            })
        }
    };

    if !token_type.eq_ignore_ascii_case("bearer") {
        return Err(Error::Other(anyhow!(
            "Unsupported access token type: {}",
            token_type,
        )));
    }

    // Store the access token
    let token = AccessToken {
        token: access_token.into(),
        token_type,
        expires_in: res.expires_in.unwrap_or_default(),
        issued_at: Some(now()),
    };
    state.access_token = Some(token.clone());

    tracing::info!("Got new access token");

    Ok(token)
}

// Select an implementation of `now()` depending on whether we are testing or not
#[cfg(not(test))]
fn now() -> chrono::DateTime<Utc> {
    Utc::now()
}
#[cfg(test)]
use tests::mocked_time::now;

/// Body of a token endpoint response, either a token or an error.
#[derive(serde::Deserialize)]
struct RawTokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    token_type: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}
