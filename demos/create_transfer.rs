use anyhow::Context;
use dwolla_rust::{
    apis::{
        auth::Credentials,
        customers::CustomerRequestBuilder,
        funding_sources::{BankAccountType, FundingSourceRequestBuilder, FundingSourceType},
        shared::Amount,
        transfers::{TransferLinks, TransferRequestBuilder},
    },
    client::Environment,
    pollable::{PollOptions, PollableUntilTerminalState},
    DwollaClient, HalResource,
};
use uuid::Uuid;

#[derive(serde::Deserialize, Debug)]
struct Config {
    key: String,
    secret: String,
    customer_email: String,
    amount: String,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    // Setup Dwolla client
    let dwolla = DwollaClient::builder(Credentials::new(config.key, config.secret))
        .with_environment(Environment::Sandbox)
        .build();

    // Find the balance of the master account
    let account = dwolla.accounts.retrieve().await?;
    tracing::info!("Account {}: {}", account.id, account.name);

    let balance = account
        .list_funding_sources(Some(false))
        .await?
        .into_items("funding-sources")
        .into_iter()
        .find(|f| f.funding_source_type == Some(FundingSourceType::Balance))
        .context("Cannot find the account balance")?;

    // Create a receive-only customer with a bank account
    let customer = dwolla
        .customers
        .create(
            &CustomerRequestBuilder::default()
                .first_name("Jane")
                .last_name("Doe")
                .email(config.customer_email)
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;
    tracing::info!("Created new customer: {}", customer.id);

    let bank = customer
        .create_funding_source(
            &FundingSourceRequestBuilder::default()
                .routing_number("222222226")
                .account_number("123456789")
                .bank_account_type(BankAccountType::Checking)
                .name("Jane's Checking")
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;
    tracing::info!("Created new funding source: {}", bank.id);

    // Send money from the balance to the customer
    let transfer = dwolla
        .transfers
        .create(
            &TransferRequestBuilder::default()
                .links(TransferLinks::new(
                    balance.link("self")?.clone(),
                    bank.link("self")?.clone(),
                ))
                .amount(Amount::usd(config.amount))
                .build()?,
            Some(&Uuid::new_v4().to_string()),
        )
        .await?;
    tracing::info!("Created new transfer: {} ({:?})", transfer.id, transfer.status);

    // The sandbox only settles bank transfers on demand
    dwolla.sandbox_simulations().await?;

    tracing::info!("Begin waiting...");

    let completed_transfer = transfer
        .poll_until_terminal_state(PollOptions::default())
        .await?;

    tracing::info!("{:#?}", completed_transfer);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
