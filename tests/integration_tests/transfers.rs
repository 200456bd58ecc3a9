use crate::{common::test_context::TestContext, integration_tests::helpers};
use dwolla_rust::{
    apis::{
        shared::Amount,
        transfers::{TransferLinks, TransferRequestBuilder, TransferStatus},
    },
    hal::Link,
    pollable::PollOptions,
    Error, HalResource, PollableUntilTerminalState,
};
use reqwest_retry::policies::ExponentialBackoff;
use std::time::Duration;

#[tokio::test]
async fn transfer_from_balance_to_customer_bank() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();
    let bank = helpers::create_bank(&customer).await.unwrap();
    let balance = helpers::account_balance(&ctx).await.unwrap();

    let transfer = helpers::create_transfer(&ctx, &balance, &bank, "1.00")
        .await
        .unwrap();
    assert_eq!(transfer.status, TransferStatus::Pending);
    assert_eq!(transfer.amount, Some(Amount::usd("1.00")));
    assert_eq!(transfer.destination().await.unwrap().id, bank.id);

    // Process the bank transfers, then wait for the transfer to settle
    ctx.client.sandbox_simulations().await.unwrap();
    let transfer = transfer
        .poll_until_terminal_state(PollOptions::default().with_retry_policy(
            ExponentialBackoff::builder()
                .retry_bounds(Duration::from_secs(1), Duration::from_secs(5))
                .build_with_max_retries(10),
        ))
        .await
        .unwrap();

    assert_eq!(transfer.status, TransferStatus::Processed);
    assert!(!transfer.has_link("cancel"));
}

#[tokio::test]
async fn cancel_pending_transfer() {
    let ctx = TestContext::start().await;
    let customer = helpers::create_unverified_customer(&ctx).await.unwrap();
    let bank = helpers::create_bank(&customer).await.unwrap();
    let balance = helpers::account_balance(&ctx).await.unwrap();
    let transfer = helpers::create_transfer(&ctx, &balance, &bank, "2.50")
        .await
        .unwrap();

    let cancelled = transfer.cancel().await.unwrap();
    assert_eq!(cancelled.status, TransferStatus::Cancelled);

    let retrieved = ctx.client.transfers.retrieve(&transfer.id).await.unwrap();
    assert_eq!(retrieved.status, TransferStatus::Cancelled);
    assert!(retrieved.cancel().await.unwrap_err().is_missing_link());
}

#[tokio::test]
async fn transfer_to_unknown_funding_source_is_rejected() {
    let ctx = TestContext::start().await;
    let balance = helpers::account_balance(&ctx).await.unwrap();
    let unknown = format!(
        "{}/funding-sources/00000000-0000-0000-0000-000000000000",
        ctx.environment().api_url()
    );

    let err = ctx
        .client
        .transfers
        .create(
            &TransferRequestBuilder::default()
                .links(TransferLinks::new(
                    balance.link("self").unwrap().clone(),
                    Link::new(unknown),
                ))
                .amount(Amount::usd("1.00"))
                .build()
                .unwrap(),
            None,
        )
        .await
        .unwrap_err();

    match err {
        Error::ValidationError(e) => {
            assert!(e
                .errors()
                .iter()
                .any(|e| e.path.as_deref() == Some("/_links/destination/href")));
        }
        e => panic!("Unexpected error: {}", e),
    }
}
