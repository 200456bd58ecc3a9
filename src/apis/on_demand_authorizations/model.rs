use crate::hal::{impl_hal_resource, Resource};
use serde::{Deserialize, Serialize};

/// Authorization text a customer agrees to, allowing later debits for variable amounts.
///
/// Its `self` link is passed as the `on-demand-authorization` link when creating the
/// customer funding source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandAuthorization {
    #[serde(flatten)]
    pub resource: Resource,
    pub body_text: String,
    pub button_text: String,
}

impl_hal_resource!(OnDemandAuthorization);
