use crate::{common::test_context::TestContext, integration_tests::helpers};
use dwolla_rust::{
    apis::funding_sources::{BankAccountType, FundingSourceRequestBuilder, FundingSourceStatus},
    Error, HalResource,
};

#[tokio::test]
async fn create_bank_for_customer() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();

    let bank = helpers::create_bank(&customer).await.unwrap();
    let retrieved = ctx.client.funding_sources.retrieve(&bank.id).await.unwrap();

    assert_eq!(retrieved.id, bank.id);
    assert_eq!(retrieved.name, "Jane's Checking");
    assert_eq!(retrieved.bank_account_type, Some(BankAccountType::Checking));
    assert_eq!(retrieved.status, Some(FundingSourceStatus::Unverified));
    assert_eq!(retrieved.customer().await.unwrap().id, customer.id);
}

#[tokio::test]
async fn bank_details_are_required() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();

    let err = customer
        .create_funding_source(
            &FundingSourceRequestBuilder::default()
                .name("Incomplete")
                .build()
                .unwrap(),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ValidationError(ref e) if !e.errors().is_empty()));
}

#[tokio::test]
async fn removed_bank_is_filtered_out_and_cannot_be_removed_again() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();
    let bank = helpers::create_bank(&customer).await.unwrap();

    let removed = bank.remove().await.unwrap();
    assert!(removed.removed);
    assert!(!removed.has_link("remove"));

    let active = customer.list_funding_sources(Some(false)).await.unwrap();
    assert!(active.iter().all(|f| f.id != bank.id));
    let all = customer.list_funding_sources(None).await.unwrap();
    assert!(all.iter().any(|f| f.id == bank.id && f.removed));

    // The relation is gone, so nothing is sent
    assert!(removed.remove().await.unwrap_err().is_missing_link());
}

#[tokio::test]
async fn rename_bank() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();
    let bank = helpers::create_bank(&customer).await.unwrap();

    let renamed = ctx
        .client
        .funding_sources
        .update(
            &bank.id,
            &FundingSourceRequestBuilder::default()
                .name("Jane's Other Checking")
                .build()
                .unwrap(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(renamed.name, "Jane's Other Checking");
}
