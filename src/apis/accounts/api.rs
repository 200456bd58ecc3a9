use crate::{
    apis::accounts::Account,
    transport::{RequestOptions, Transport},
    Error,
};

/// Dwolla account APIs client.
#[derive(Clone, Debug)]
pub struct AccountsApi {
    transport: Transport,
}

impl AccountsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Retrieves the account the credentials belong to, found through the root resource.
    #[tracing::instrument(name = "Retrieve Account", skip(self))]
    pub async fn retrieve(&self) -> Result<Account, Error> {
        let root = self.transport.root().await?;
        let (transport, link) = root.follow("account")?;

        transport.fetch(&link.href, &RequestOptions::default()).await
    }
}
