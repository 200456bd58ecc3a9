use crate::{common::test_context::TestContext, integration_tests::helpers};
use dwolla_rust::{apis::funding_sources::FundingSourceStatus, HalResource};

#[tokio::test]
async fn retrieve_account_through_root() {
    let ctx = TestContext::start().await;

    let root = ctx.client.root().await.unwrap();
    let account = ctx.client.accounts.retrieve().await.unwrap();

    assert_eq!(
        account.link("self").unwrap().href,
        root.link("account").unwrap().href
    );
    assert!(!account.name.is_empty());
    assert!(account.has_link("funding-sources"));
}

#[tokio::test]
async fn account_has_a_verified_balance() {
    let ctx = TestContext::start().await;

    let balance = helpers::account_balance(&ctx).await.unwrap();

    assert_eq!(balance.status, Some(FundingSourceStatus::Verified));
    assert!(!balance.removed);
}
