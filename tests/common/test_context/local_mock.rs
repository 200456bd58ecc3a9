use crate::common::mock_server::DwollaMockServer;
use dwolla_rust::{apis::auth::Credentials, client::Environment, DwollaClient};
use uuid::Uuid;

pub struct TestContext {
    pub client: DwollaClient,
    mock_server: DwollaMockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        // Generate a new set of random credentials for this specific test
        let key = Uuid::new_v4().to_string();
        let secret = Uuid::new_v4().to_string();

        let mock_server = DwollaMockServer::start(&key, &secret).await;

        // Configure a new DwollaClient to point to the mock server
        let client = DwollaClient::builder(Credentials::new(key, secret))
            .with_environment(Environment::from_single_url(mock_server.url()))
            .build();

        Self {
            client,
            mock_server,
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::from_single_url(self.mock_server.url())
    }

    /// Makes the server reject the access token currently held by the client.
    pub fn expire_access_token(&self) {
        self.mock_server.expire_access_token();
    }
}
