use crate::{
    common::{UNKNOWN_ERROR_CODE, VALIDATION_ERROR_CODE},
    error::{Error, HalError, ValidationError},
    hal::Links,
};
use async_trait::async_trait;
use reqwest::{Method, Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use std::collections::HashMap;
use task_local_extensions::Extensions;

/// Reqwest middleware which translates failed responses returned by the Dwolla APIs
/// into [`Error::HalError`](crate::error::Error) or [`Error::ValidationError`](crate::error::Error).
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();

        // Capture the response
        let response = next.run(req, extensions).await?;

        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let error = error_from_response(&method, response).await?;
            return Err(error.into());
        }

        Ok(response)
    }
}

async fn error_from_response(
    method: &Method,
    response: Response,
) -> reqwest_middleware::Result<Error> {
    let status = response.status();
    let bytes = response.bytes().await?;

    // Only bodies carrying an error code are considered conforming
    let body: Option<serde_json::Value> = serde_json::from_slice(&bytes)
        .ok()
        .filter(|v: &serde_json::Value| v.get("code").map_or(false, |c| c.is_string()));

    let error = match body {
        Some(body) if *method == Method::POST && body["code"] == VALIDATION_ERROR_CODE => {
            match serde_json::from_value::<ValidationError>(body) {
                Ok(mut e) => {
                    e.status = Some(status.as_u16());
                    Error::ValidationError(e)
                }
                Err(_) => Error::HalError(unknown_error(status, &bytes)),
            }
        }
        Some(body) => match serde_json::from_value::<HalError>(body) {
            Ok(mut e) => {
                e.status = Some(status.as_u16());
                Error::HalError(e)
            }
            Err(_) => Error::HalError(unknown_error(status, &bytes)),
        },
        None => Error::HalError(unknown_error(status, &bytes)),
    };

    Ok(error)
}

fn unknown_error(status: StatusCode, body: &[u8]) -> HalError {
    let text = String::from_utf8_lossy(body).trim().to_string();
    let message = if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        text
    };

    HalError {
        status: Some(status.as_u16()),
        code: UNKNOWN_ERROR_CODE.to_string(),
        message,
        path: None,
        links: Links::default(),
        embedded: HashMap::new(),
    }
}
