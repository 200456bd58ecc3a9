use dwolla_rust::{apis::auth::Credentials, client::Environment, DwollaClient};

/// Sandbox application credentials, read from `ACCEPTANCE_TESTS_KEY` and `ACCEPTANCE_TESTS_SECRET`.
#[derive(serde::Deserialize)]
struct AcceptanceTestsConfig {
    key: String,
    secret: String,
}

pub struct TestContext {
    pub client: DwollaClient,
}

impl TestContext {
    pub async fn start() -> Self {
        // Take the required credentials from the env
        let config: AcceptanceTestsConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("ACCEPTANCE_TESTS"))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        // Configure a new DwollaClient to point to Sandbox
        let client = DwollaClient::builder(Credentials::new(config.key, config.secret))
            .with_environment(Environment::Sandbox)
            .build();

        Self { client }
    }

    pub fn environment(&self) -> Environment {
        Environment::Sandbox
    }
}
