//! Value types shared by several Dwolla resources.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Monetary value. The value is kept as the decimal string the API uses, to avoid rounding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    /// Builds an amount in US dollars, e.g. `Amount::usd("10.00")`.
    pub fn usd(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: Currency::Usd,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    #[serde(rename = "USD", alias = "usd")]
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Postal address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    pub city: String,
    pub state_province_region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Passport {
    pub number: String,
    pub country: String,
}

/// Clearing speed of each leg of a transfer, e.g. `next-available`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Clearing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Addenda records sent to the banks along with a transfer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AchDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Addenda>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Addenda>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda {
    pub addenda: AddendaValues,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AddendaValues {
    pub values: Vec<String>,
}

/// Free form key/value pairs attached to a resource.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A short-lived token handed to front-end components (e.g. dwolla.js).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceToken {
    #[serde(flatten)]
    pub resource: crate::hal::Resource,
    pub token: String,
}

crate::hal::impl_hal_resource!(ResourceToken);
