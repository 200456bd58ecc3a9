//! Tokens handed to Dwolla's front-end drop-in components.

use crate::hal::{impl_hal_resource, Resource};
use serde::{Deserialize, Serialize};

/// Body of a client token request. The customer, if any, is referenced in `_links`.
#[derive(Serialize, Debug, Clone)]
pub struct ClientTokenRequest {
    #[serde(flatten)]
    pub resource: Resource,
    /// Action the token is scoped to, e.g. `customer.update`.
    pub action: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientToken {
    #[serde(flatten)]
    pub resource: Resource,
    pub token: String,
}

impl_hal_resource!(ClientToken);
