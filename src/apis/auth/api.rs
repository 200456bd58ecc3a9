use crate::{apis::auth::AccessToken, authenticator::Authenticator, Error};

/// Access to the token lifecycle of a [`DwollaClient`](crate::DwollaClient).
#[derive(Debug, Clone)]
pub struct AuthApi {
    authenticator: Authenticator,
}

impl AuthApi {
    pub(crate) fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }

    /// Returns the current access token, requesting a new one if none is cached or the
    /// cached one is expired.
    pub async fn get_access_token(&self) -> Result<AccessToken, Error> {
        self.authenticator.get_access_token().await
    }

    /// Unconditionally exchanges the configured credentials for a new access token.
    pub async fn request_token(&self) -> Result<AccessToken, Error> {
        self.authenticator.request_token().await
    }
}
