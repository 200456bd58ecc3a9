use crate::common::test_context::TestContext;
use dwolla_rust::{apis::auth::Credentials, DwollaClient, Error};

#[tokio::test]
async fn get_access_token() {
    let ctx = TestContext::start().await;

    let access_token = ctx.client.auth.get_access_token().await.unwrap();

    assert!(!access_token.token().expose_secret().is_empty());
    assert!(!access_token.is_expired());
}

#[tokio::test]
async fn cached_access_token_is_reused() {
    let ctx = TestContext::start().await;

    let first = ctx.client.auth.get_access_token().await.unwrap();
    let second = ctx.client.auth.get_access_token().await.unwrap();

    assert_eq!(first.issued_at(), second.issued_at());
}

#[tokio::test]
async fn invalid_credentials() {
    let ctx = TestContext::start().await;

    // Create a new client with a set of invalid credentials pointing to the same server
    let client = DwollaClient::builder(Credentials::new("invalid", "invalid"))
        .with_environment(ctx.environment())
        .build();

    // Make the request and assert that we got an error
    let err = client
        .auth
        .get_access_token()
        .await
        .expect_err("Expected error");
    assert!(matches!(err, Error::Authentication { code, .. } if code == "invalid_client"));

    // API calls surface the same failure
    let err = client.accounts.retrieve().await.expect_err("Expected error");
    assert!(matches!(err, Error::Authentication { .. }));
}
