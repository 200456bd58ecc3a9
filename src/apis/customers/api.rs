use crate::{
    apis::customers::{Customer, CustomerRequest},
    hal::Collection,
    transport::{RequestOptions, Transport},
    Error,
};
use urlencoding::encode;

/// Dwolla customers APIs client.
#[derive(Clone, Debug)]
pub struct CustomersApi {
    transport: Transport,
}

impl CustomersApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Creates a new customer.
    ///
    /// Passing an idempotency key makes the request safe to retry.
    #[tracing::instrument(
        name = "Create Customer",
        skip(self, req),
        fields(customer_type = ?req.customer_type)
    )]
    pub async fn create(
        &self,
        req: &CustomerRequest,
        idempotency_key: Option<&str>,
    ) -> Result<Customer, Error> {
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        self.transport.submit("customers", Some(req), &options).await
    }

    /// Lists and searches customers, embedded under `customers`.
    ///
    /// Filters (`search`, `email`, `status`) and paging (`limit`, `offset`) go in the query.
    #[tracing::instrument(name = "List Customers", skip_all)]
    pub async fn list(&self, options: &RequestOptions) -> Result<Collection<Customer>, Error> {
        self.transport.fetch("customers", options).await
    }

    #[tracing::instrument(name = "Retrieve Customer", skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Customer, Error> {
        self.transport
            .fetch(
                &format!("customers/{}", encode(id)),
                &RequestOptions::default(),
            )
            .await
    }

    #[tracing::instrument(name = "Update Customer", skip(self, req))]
    pub async fn update(
        &self,
        id: &str,
        req: &CustomerRequest,
        idempotency_key: Option<&str>,
    ) -> Result<Customer, Error> {
        let options = RequestOptions::new().maybe_idempotency_key(idempotency_key);

        self.transport
            .submit(&format!("customers/{}", encode(id)), Some(req), &options)
            .await
    }
}
