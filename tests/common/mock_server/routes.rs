use crate::common::mock_server::{
    MockCustomer, MockFundingSource, MockServerConfiguration, MockServerStorage,
    MockServerStorageInner, MockTransfer, Owner,
};
use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use chrono::Utc;
use dwolla_rust::apis::{
    customers::{CustomerRequest, CustomerStatus, CustomerType},
    funding_sources::{FundingSourceRequest, FundingSourceStatus, FundingSourceType},
    transfers::{TransferRequest, TransferStatus},
};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

static HAL_CONTENT_TYPE: &str = "application/vnd.dwolla.v1.hal+json";

/// Origin the client used to reach this server, to build absolute links.
fn base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

fn hal_error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(HAL_CONTENT_TYPE)
        .json(json!({ "code": code, "message": message }))
}

fn not_found() -> HttpResponse {
    hal_error(
        StatusCode::NOT_FOUND,
        "NotFound",
        "The requested resource was not found.",
    )
}

/// `ValidationError` carrying one embedded error per `(code, path, message)`.
fn validation_error(errors: &[(&str, &str, &str)]) -> HttpResponse {
    let errors = errors
        .iter()
        .map(|(code, path, message)| {
            json!({ "code": code, "path": path, "message": message, "_links": {} })
        })
        .collect::<Vec<_>>();

    HttpResponse::BadRequest()
        .content_type(HAL_CONTENT_TYPE)
        .json(json!({
            "code": "ValidationError",
            "message": "Validation error(s) present. See embedded errors list for more details.",
            "_embedded": { "errors": errors }
        }))
}

fn hal(body: Value) -> HttpResponse {
    HttpResponse::Ok().content_type(HAL_CONTENT_TYPE).json(body)
}

fn created(location: String) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Checks the protocol headers every API request must carry.
fn check_request(req: &HttpRequest, storage: &MockServerStorageInner) -> Result<(), HttpResponse> {
    let value_of = |name| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    };

    if !value_of(header::USER_AGENT).starts_with("dwolla-rust/") {
        return Err(hal_error(
            StatusCode::BAD_REQUEST,
            "BadRequest",
            "Missing User-Agent.",
        ));
    }
    if value_of(header::ACCEPT) != HAL_CONTENT_TYPE {
        return Err(hal_error(
            StatusCode::NOT_ACCEPTABLE,
            "InvalidVersion",
            "Missing or invalid Accept header.",
        ));
    }

    let token = value_of(header::AUTHORIZATION)
        .strip_prefix("Bearer ")
        .unwrap_or_default();
    if token == storage.access_token {
        Ok(())
    } else if storage.expired_tokens.contains(token) {
        Err(hal_error(
            StatusCode::UNAUTHORIZED,
            "ExpiredAccessToken",
            "Invalid access token.",
        ))
    } else {
        Err(hal_error(
            StatusCode::UNAUTHORIZED,
            "InvalidAccessToken",
            "Invalid access token.",
        ))
    }
}

/// Runs `f` on the storage once the request passed the protocol checks.
fn with_storage<F>(req: &HttpRequest, storage: &MockServerStorage, f: F) -> HttpResponse
where
    F: FnOnce(&mut MockServerStorageInner) -> HttpResponse,
{
    let mut storage = storage.write().unwrap();
    match check_request(req, &storage) {
        Ok(()) => f(&mut storage),
        Err(res) => res,
    }
}

fn customer_json(base: &str, customer: &MockCustomer) -> Value {
    let href = format!("{}/customers/{}", base, customer.id);
    let mut links = json!({
        "self": { "href": href },
        "edit": { "href": href },
        "funding-sources": { "href": format!("{}/funding-sources", href) },
        "transfers": { "href": format!("{}/transfers", href) },
        "receive": { "href": format!("{}/transfers", base) },
    });
    let status_link = match customer.status {
        CustomerStatus::Deactivated => "reactivate",
        _ => "deactivate",
    };
    links[status_link] = json!({ "href": href });

    json!({
        "_links": links,
        "id": customer.id,
        "firstName": customer.first_name,
        "lastName": customer.last_name,
        "email": customer.email,
        "type": customer.customer_type,
        "status": customer.status,
        "created": customer.created,
    })
}

fn funding_source_json(
    base: &str,
    configuration: &MockServerConfiguration,
    funding_source: &MockFundingSource,
) -> Value {
    let href = format!("{}/funding-sources/{}", base, funding_source.id);
    let mut links = json!({ "self": { "href": href } });
    match &funding_source.owner {
        Owner::Account => {
            links["account"] =
                json!({ "href": format!("{}/accounts/{}", base, configuration.account_id) });
        }
        Owner::Customer(customer_id) => {
            links["customer"] = json!({ "href": format!("{}/customers/{}", base, customer_id) });
        }
    }
    if !funding_source.removed {
        match funding_source.funding_source_type {
            FundingSourceType::Balance => {
                links["balance"] = json!({ "href": format!("{}/balance", href) });
                links["transfer-send"] = json!({ "href": format!("{}/transfers", base) });
            }
            _ => {
                links["remove"] = json!({ "href": href });
                links["transfer-receive"] = json!({ "href": format!("{}/transfers", base) });
            }
        }
    }

    json!({
        "_links": links,
        "id": funding_source.id,
        "status": match funding_source.funding_source_type {
            FundingSourceType::Balance => FundingSourceStatus::Verified,
            _ => FundingSourceStatus::Unverified,
        },
        "type": funding_source.funding_source_type,
        "bankAccountType": funding_source.bank_account_type,
        "name": funding_source.name,
        "created": funding_source.created,
        "removed": funding_source.removed,
        "channels": ["ach"],
    })
}

fn transfer_json(base: &str, transfer: &MockTransfer) -> Value {
    let href = format!("{}/transfers/{}", base, transfer.id);
    let mut links = json!({
        "self": { "href": href },
        "source": { "href": transfer.source },
        "destination": { "href": transfer.destination },
        "source-funding-source": { "href": transfer.source },
        "destination-funding-source": { "href": transfer.destination },
    });
    if transfer.status == TransferStatus::Pending {
        links["cancel"] = json!({ "href": href });
    }

    json!({
        "_links": links,
        "id": transfer.id,
        "status": transfer.status,
        "amount": transfer.amount,
        "created": transfer.created,
    })
}

/// Id at the end of a funding source address, if it is one of ours.
fn funding_source_id<'a>(base: &str, href: &'a str) -> Option<&'a str> {
    href.strip_prefix(base)?.strip_prefix("/funding-sources/")
}

/// POST /token
pub(super) async fn post_token(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    body: String,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if authorization != configuration.basic_auth || body != "grant_type=client_credentials" {
        return HttpResponse::Unauthorized().json(json!({
            "error": "invalid_client",
            "error_description": "Invalid client credentials."
        }));
    }

    HttpResponse::Ok().json(json!({
        "token_type": "bearer",
        "access_token": storage.read().unwrap().access_token,
        "expires_in": 3600
    }))
}

/// GET /
pub(super) async fn get_root(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let base = base_url(&req);
    with_storage(&req, &storage, |_| {
        hal(json!({
            "_links": {
                "account": { "href": format!("{}/accounts/{}", base, configuration.account_id) },
                "customers": { "href": format!("{}/customers", base) },
                "events": { "href": format!("{}/events", base) },
                "webhook-subscriptions": { "href": format!("{}/webhook-subscriptions", base) },
            }
        }))
    })
}

/// GET /accounts/{id}
pub(super) async fn get_account(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |_| {
        if id != configuration.account_id {
            return not_found();
        }

        let href = format!("{}/accounts/{}", base, id);
        hal(json!({
            "_links": {
                "self": { "href": href },
                "funding-sources": { "href": format!("{}/funding-sources", href) },
                "transfers": { "href": format!("{}/transfers", href) },
                "customers": { "href": format!("{}/customers", base) },
            },
            "id": id,
            "name": "Mock Account",
            "timezoneOffset": -5.0,
            "type": "Commercial",
        }))
    })
}

/// GET /accounts/{id}/funding-sources
pub(super) async fn list_account_funding_sources(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        if id != configuration.account_id {
            return not_found();
        }

        list_funding_sources(&base, &configuration, storage, &Owner::Account, &query)
    })
}

fn list_funding_sources(
    base: &str,
    configuration: &MockServerConfiguration,
    storage: &MockServerStorageInner,
    owner: &Owner,
    query: &HashMap<String, String>,
) -> HttpResponse {
    let removed = query.get("removed").map(|r| r == "true");
    let items = storage
        .funding_sources
        .values()
        .filter(|f| f.owner == *owner)
        .filter(|f| removed.map_or(true, |removed| f.removed == removed))
        .map(|f| funding_source_json(base, configuration, f))
        .collect::<Vec<_>>();

    hal(json!({
        "_embedded": { "funding-sources": items },
        "total": items.len(),
    }))
}

/// POST /customers
pub(super) async fn create_customer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    body: web::Json<CustomerRequest>,
) -> HttpResponse {
    let base = base_url(&req);
    let body = body.into_inner();
    with_storage(&req, &storage, |storage| {
        let (first_name, last_name, email) = match (body.first_name, body.last_name, body.email) {
            (Some(first_name), Some(last_name), Some(email)) => (first_name, last_name, email),
            (first_name, last_name, email) => {
                let mut errors = vec![];
                if first_name.is_none() {
                    errors.push(("Required", "/firstName", "FirstName required."));
                }
                if last_name.is_none() {
                    errors.push(("Required", "/lastName", "LastName required."));
                }
                if email.is_none() {
                    errors.push(("Required", "/email", "Email required."));
                }
                return validation_error(&errors);
            }
        };

        if storage.customers.iter().any(|c| c.email == email) {
            return validation_error(&[("Duplicate", "/email", "Email already exists.")]);
        }

        let customer = MockCustomer {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            email,
            customer_type: body.customer_type.unwrap_or(CustomerType::Unverified),
            status: CustomerStatus::Unverified,
            created: Utc::now(),
        };
        let location = format!("{}/customers/{}", base, customer.id);
        storage.customers.push(customer);

        created(location)
    })
}

/// GET /customers
pub(super) async fn list_customers(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let base = base_url(&req);
    with_storage(&req, &storage, |storage| {
        let search = query.get("search").map(|s| s.to_lowercase());
        let matching = storage
            .customers
            .iter()
            .filter(|c| {
                search.as_ref().map_or(true, |s| {
                    c.email.to_lowercase().contains(s)
                        || c.first_name.to_lowercase().contains(s)
                        || c.last_name.to_lowercase().contains(s)
                })
            })
            .collect::<Vec<_>>();

        let limit = query
            .get("limit")
            .and_then(|l| l.parse().ok())
            .unwrap_or(25);
        let offset = query
            .get("offset")
            .and_then(|o| o.parse().ok())
            .unwrap_or(0);
        let items = matching
            .iter()
            .skip(offset)
            .take(limit)
            .map(|c| customer_json(&base, c))
            .collect::<Vec<_>>();

        hal(json!({
            "_links": { "self": { "href": format!("{}/customers", base) } },
            "_embedded": { "customers": items },
            "total": matching.len(),
        }))
    })
}

/// GET /customers/{id}
pub(super) async fn get_customer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        storage
            .customers
            .iter()
            .find(|c| c.id == id)
            .map_or_else(not_found, |c| hal(customer_json(&base, c)))
    })
}

/// POST /customers/{id}
pub(super) async fn update_customer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    body: web::Json<CustomerRequest>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    let body = body.into_inner();
    with_storage(&req, &storage, |storage| {
        let customer = match storage.customers.iter_mut().find(|c| c.id == id) {
            Some(customer) => customer,
            None => return not_found(),
        };

        match body.status {
            Some(CustomerStatus::Deactivated) => customer.status = CustomerStatus::Deactivated,
            Some(CustomerStatus::Reactivated) if customer.status == CustomerStatus::Deactivated => {
                customer.status = CustomerStatus::Unverified
            }
            Some(_) => {
                return validation_error(&[("Invalid", "/status", "Status invalid.")]);
            }
            None => {}
        }
        if let Some(email) = body.email {
            customer.email = email;
        }
        if let Some(first_name) = body.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = body.last_name {
            customer.last_name = last_name;
        }

        hal(customer_json(&base, customer))
    })
}

/// POST /customers/{id}/funding-sources
pub(super) async fn create_customer_funding_source(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    body: web::Json<FundingSourceRequest>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    let body = body.into_inner();
    with_storage(&req, &storage, |storage| {
        if !storage.customers.iter().any(|c| c.id == id) {
            return not_found();
        }

        let (name, bank_account_type) = match (
            body.routing_number,
            body.account_number,
            body.bank_account_type,
            body.name,
        ) {
            (Some(_), Some(_), Some(bank_account_type), Some(name)) => (name, bank_account_type),
            _ => {
                return validation_error(&[(
                    "Required",
                    "/accountNumber",
                    "Bank details required.",
                )])
            }
        };

        let funding_source = MockFundingSource {
            id: Uuid::new_v4().to_string(),
            owner: Owner::Customer(id),
            name,
            funding_source_type: FundingSourceType::Bank,
            bank_account_type: Some(bank_account_type),
            removed: false,
            created: Utc::now(),
        };
        let location = format!("{}/funding-sources/{}", base, funding_source.id);
        storage
            .funding_sources
            .insert(funding_source.id.clone(), funding_source);

        created(location)
    })
}

/// GET /customers/{id}/funding-sources
pub(super) async fn list_customer_funding_sources(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        if !storage.customers.iter().any(|c| c.id == id) {
            return not_found();
        }

        list_funding_sources(&base, &configuration, storage, &Owner::Customer(id), &query)
    })
}

/// GET /funding-sources/{id}
pub(super) async fn get_funding_source(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        storage
            .funding_sources
            .get(&id)
            .map_or_else(not_found, |f| {
                hal(funding_source_json(&base, &configuration, f))
            })
    })
}

/// POST /funding-sources/{id}
pub(super) async fn update_funding_source(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    body: web::Json<FundingSourceRequest>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    let body = body.into_inner();
    with_storage(&req, &storage, |storage| {
        let funding_source = match storage.funding_sources.get_mut(&id) {
            Some(funding_source) => funding_source,
            None => return not_found(),
        };
        if funding_source.removed {
            return validation_error(&[(
                "InvalidResourceState",
                "/removed",
                "Resource cannot be modified.",
            )]);
        }

        if body.removed == Some(true) {
            funding_source.removed = true;
        }
        if let Some(name) = body.name {
            funding_source.name = name;
        }

        hal(funding_source_json(&base, &configuration, funding_source))
    })
}

/// POST /transfers
pub(super) async fn create_transfer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    body: web::Json<TransferRequest>,
) -> HttpResponse {
    let base = base_url(&req);
    let body = body.into_inner();
    with_storage(&req, &storage, |storage| {
        let usable = |href: &str| {
            funding_source_id(&base, href)
                .and_then(|id| storage.funding_sources.get(id))
                .map_or(false, |f| !f.removed)
        };
        if !usable(&body.links.source.href) {
            return validation_error(&[(
                "Invalid",
                "/_links/source/href",
                "Invalid funding source.",
            )]);
        }
        if !usable(&body.links.destination.href) {
            return validation_error(&[(
                "Invalid",
                "/_links/destination/href",
                "Invalid funding source.",
            )]);
        }

        let transfer = MockTransfer {
            id: Uuid::new_v4().to_string(),
            source: body.links.source.href,
            destination: body.links.destination.href,
            amount: body.amount,
            status: TransferStatus::Pending,
            created: Utc::now(),
        };
        let location = format!("{}/transfers/{}", base, transfer.id);
        storage.transfers.insert(transfer.id.clone(), transfer);

        created(location)
    })
}

/// GET /transfers/{id}
pub(super) async fn get_transfer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        storage
            .transfers
            .get(&id)
            .map_or_else(not_found, |t| hal(transfer_json(&base, t)))
    })
}

/// POST /transfers/{id}
pub(super) async fn cancel_transfer(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let base = base_url(&req);
    let id = path.into_inner();
    with_storage(&req, &storage, |storage| {
        let transfer = match storage.transfers.get_mut(&id) {
            Some(transfer) => transfer,
            None => return not_found(),
        };

        if body["status"] != "cancelled" || transfer.status != TransferStatus::Pending {
            return validation_error(&[(
                "InvalidResourceState",
                "/status",
                "Resource cannot be modified.",
            )]);
        }
        transfer.status = TransferStatus::Cancelled;

        hal(transfer_json(&base, transfer))
    })
}

/// POST /sandbox-simulations
pub(super) async fn sandbox_simulations(
    req: HttpRequest,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    with_storage(&req, &storage, |storage| {
        let mut processed = 0;
        for transfer in storage.transfers.values_mut() {
            if transfer.status == TransferStatus::Pending {
                transfer.status = TransferStatus::Processed;
                processed += 1;
            }
        }

        hal(json!({ "total": processed }))
    })
}
