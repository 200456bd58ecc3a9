use crate::hal::{impl_hal_resource, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A business category, grouping the industry classifications a business customer can pick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BusinessClassification {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    pub name: String,
    #[serde(rename = "_embedded", default)]
    pub embedded: HashMap<String, Vec<IndustryClassification>>,
}

impl_hal_resource!(BusinessClassification);

impl BusinessClassification {
    pub fn industry_classifications(&self) -> &[IndustryClassification] {
        self.embedded
            .get("industry-classifications")
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Value of the `businessClassification` field of a business customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryClassification {
    pub id: String,
    pub name: String,
}
