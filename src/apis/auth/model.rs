use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Application key and secret used for the client credentials exchange.
///
/// Deserializable, so it can be loaded straight from a configuration source.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Credentials {
    pub key: String,
    pub secret: Token,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: Token::new(secret),
        }
    }
}

/// Bearer token issued by the Dwolla token endpoint.
///
/// A token never issued, or issued with a zero lifetime, is always expired.
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub(crate) token: Token,
    pub(crate) token_type: String,
    pub(crate) expires_in: i64,
    pub(crate) issued_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Actual token contents held by this `AccessToken` instance.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Declared lifetime of the token, in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Instant the token was obtained, if it ever was.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    /// Returns `true` if the token must not be used anymore at the instant `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.issued_at {
            None => true,
            Some(_) if self.expires_in <= 0 => true,
            Some(issued_at) => now - issued_at >= Duration::seconds(self.expires_in),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl Default for AccessToken {
    fn default() -> Self {
        Self {
            token: Token::new(""),
            token_type: String::new(),
            expires_in: 0,
            issued_at: None,
        }
    }
}

impl Deref for AccessToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        self.token()
    }
}

/// Wrapper for a secret string that makes it harder to accidentally expose secrets
/// and ensures the backing memory is wiped on drop.
///
/// ```rust
/// # use dwolla_rust::apis::auth::Token;
/// let token = Token::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", token).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`
/// assert_eq!(token.expose_secret(), "supersecret");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Token(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl Token {
    /// Wraps a secret string in a new `Token`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for Token
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Token::new(s)
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}
