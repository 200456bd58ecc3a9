//! HAL building blocks shared by every Dwolla resource.
//!
//! Every response body may carry a `_links` map describing what can be done next with the
//! resource. The client never builds URLs for follow-on operations: it reads the relation
//! out of the [`Links`] of a resource it already holds and calls its target.

use crate::{transport::Transport, Error};
use anyhow::anyhow;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    collections::{hash_map, HashMap},
    fmt::{Debug, Formatter},
};

/// A link to a related resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target address of the relation.
    pub href: String,
    /// Declared content type of the target, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Declared resource type of the target (e.g. `customer`), if any.
    #[serde(
        rename = "resource-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_type: Option<String>,
}

impl Link {
    /// Creates a new link pointing to `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            content_type: None,
            resource_type: None,
        }
    }
}

/// Relations available on a resource, keyed by relation name.
///
/// A missing relation is not an error by itself: it means the resource does not support
/// that operation in its current state. Use [`Links::require`] to turn the absence into
/// an [`Error::MissingLink`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Links(HashMap<String, Link>);

impl Links {
    /// Returns the link for `relation`, if present.
    pub fn get(&self, relation: &str) -> Option<&Link> {
        self.0.get(relation)
    }

    /// Returns the link for `relation`, or [`Error::MissingLink`] if absent.
    pub fn require(&self, relation: &str) -> Result<&Link, Error> {
        self.get(relation).ok_or_else(|| Error::MissingLink {
            relation: relation.to_string(),
        })
    }

    /// Returns `true` if `relation` is present.
    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains_key(relation)
    }

    /// Adds (or replaces) a relation.
    pub fn insert(&mut self, relation: impl Into<String>, link: Link) -> Option<Link> {
        self.0.insert(relation.into(), link)
    }

    /// Returns a copy of these links with an additional relation.
    pub fn with(mut self, relation: impl Into<String>, link: Link) -> Self {
        self.insert(relation, link);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over all the relations, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Link> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Link)> for Links {
    fn from_iter<I: IntoIterator<Item = (K, Link)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Base of every Dwolla resource: its links plus the client that fetched it.
///
/// The client reference is never part of the JSON payload. It is attached after decoding
/// by the transport, so that resource methods like [`Transfer::cancel`](crate::apis::transfers::Transfer::cancel)
/// can issue further calls without the caller passing a client around.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Resource {
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
    #[serde(skip)]
    transport: Option<Transport>,
}

impl Resource {
    /// Builds a detached resource from a set of links.
    ///
    /// Mostly useful to pre-seed the root resource with [`Transport::set_root`](crate::transport::Transport::set_root)
    /// or to reference other resources in request bodies.
    pub fn new(links: Links) -> Self {
        Self {
            links,
            transport: None,
        }
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Returns `true` if a client has been attached to this resource.
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    pub(crate) fn attach(&mut self, transport: &Transport) {
        self.transport = Some(transport.clone());
    }

    /// Returns the attached transport or [`Error::Detached`].
    pub(crate) fn transport(&self) -> Result<&Transport, Error> {
        self.transport.as_ref().ok_or(Error::Detached)
    }

    /// Resolves `relation` and the transport needed to call it.
    ///
    /// The relation is checked first, so a missing link never reaches the network.
    pub(crate) fn follow(&self, relation: &str) -> Result<(&Transport, &Link), Error> {
        let link = self.links.require(relation)?;
        Ok((self.transport()?, link))
    }
}

impl Debug for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("links", &self.links)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.links == other.links
    }
}

/// A decodable HAL resource that can receive a client reference after decoding.
pub trait HalResource: DeserializeOwned + Send {
    fn resource(&self) -> &Resource;

    fn resource_mut(&mut self) -> &mut Resource;

    /// Attaches the client to this resource and to everything embedded in it.
    ///
    /// Called automatically on every value returned by the [`Transport`].
    fn attach(&mut self, transport: &Transport) {
        self.resource_mut().attach(transport);
    }

    fn links(&self) -> &Links {
        self.resource().links()
    }

    /// Returns the link for `relation`, or [`Error::MissingLink`] if absent.
    fn link(&self, relation: &str) -> Result<&Link, Error> {
        self.links().require(relation)
    }

    fn has_link(&self, relation: &str) -> bool {
        self.links().contains(relation)
    }
}

impl HalResource for Resource {
    fn resource(&self) -> &Resource {
        self
    }

    fn resource_mut(&mut self) -> &mut Resource {
        self
    }
}

/// Implements [`HalResource`] for structs holding their base in a `resource` field.
macro_rules! impl_hal_resource {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::hal::HalResource for $t {
                fn resource(&self) -> &$crate::hal::Resource {
                    &self.resource
                }

                fn resource_mut(&mut self) -> &mut $crate::hal::Resource {
                    &mut self.resource
                }
            }
        )+
    };
}
pub(crate) use impl_hal_resource;

/// A list response: links, embedded resources grouped by relation and a total count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Collection<T> {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(rename = "_embedded", default = "HashMap::new")]
    pub embedded: HashMap<String, Vec<T>>,
    /// Total number of items matching the query, across all pages.
    #[serde(default)]
    pub total: u64,
}

impl<T> Collection<T> {
    /// Embedded items for `relation` (e.g. `customers`).
    pub fn items(&self, relation: &str) -> &[T] {
        self.embedded
            .get(relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Takes the embedded items for `relation`.
    pub fn into_items(mut self, relation: &str) -> Vec<T> {
        self.embedded.remove(relation).unwrap_or_default()
    }

    /// Iterates over every embedded item, regardless of relation.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.embedded.values().flatten()
    }
}

impl<T: HalResource> HalResource for Collection<T> {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    fn attach(&mut self, transport: &Transport) {
        self.resource.attach(transport);
        for item in self.embedded.values_mut().flatten() {
            item.attach(transport);
        }
    }
}

/// Extracts the id at the end of a resource address.
///
/// Handy when processing webhooks, which carry addresses while the id-based
/// entry points of this crate expect bare ids.
///
/// ```rust
/// # use dwolla_rust::hal::id_from_href;
/// let id = id_from_href("https://api.dwolla.com/customers/3f1c2e2a").unwrap();
/// assert_eq!(id, "3f1c2e2a");
/// ```
pub fn id_from_href(href: &str) -> Result<&str, Error> {
    let trimmed = href.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) if idx + 1 < trimmed.len() => Ok(&trimmed[idx + 1..]),
        _ => Err(Error::Other(anyhow!("Unable to extract an id from {}", href))),
    }
}
