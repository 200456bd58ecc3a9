use crate::common::test_context::TestContext;
use anyhow::Context;
use dwolla_rust::{
    apis::{
        customers::{Customer, CustomerRequestBuilder},
        funding_sources::{
            BankAccountType, FundingSource, FundingSourceRequestBuilder, FundingSourceType,
        },
        shared::Amount,
        transfers::{Transfer, TransferLinks, TransferRequestBuilder},
    },
    HalResource,
};
use uuid::Uuid;

pub async fn create_unverified_customer(ctx: &TestContext) -> anyhow::Result<Customer> {
    let customer = ctx
        .client
        .customers
        .create(
            &CustomerRequestBuilder::default()
                .first_name("Jane")
                .last_name("Merchant")
                .email(format!("jane+{}@example.com", Uuid::new_v4()))
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;

    Ok(customer)
}

pub async fn create_bank(customer: &Customer) -> anyhow::Result<FundingSource> {
    let bank = customer
        .create_funding_source(
            &FundingSourceRequestBuilder::default()
                .routing_number("222222226")
                .account_number(format!("{:012}", Uuid::new_v4().as_u128() % 1_000_000_000_000))
                .bank_account_type(BankAccountType::Checking)
                .name("Jane's Checking")
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;

    Ok(bank)
}

/// The balance funding source of the master account.
pub async fn account_balance(ctx: &TestContext) -> anyhow::Result<FundingSource> {
    let account = ctx.client.accounts.retrieve().await?;

    account
        .list_funding_sources(Some(false))
        .await?
        .into_items("funding-sources")
        .into_iter()
        .find(|f| f.funding_source_type == Some(FundingSourceType::Balance))
        .context("The account has no balance")
}

pub async fn create_transfer(
    ctx: &TestContext,
    source: &FundingSource,
    destination: &FundingSource,
    value: &str,
) -> anyhow::Result<Transfer> {
    let transfer = ctx
        .client
        .transfers
        .create(
            &TransferRequestBuilder::default()
                .links(TransferLinks::new(
                    source.link("self")?.clone(),
                    destination.link("self")?.clone(),
                ))
                .amount(Amount::usd(value))
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;

    Ok(transfer)
}
