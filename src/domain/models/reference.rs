//! Reference Tables
//!
//! Read-only lookup sets (fabric versions, node types, network and host types)
//! that every node request is checked against. Built once at startup and
//! shared behind an `Arc`.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use super::node::NetworkType;

pub const DEFAULT_FABRIC_VERSIONS: &[&str] = &["1.4", "2.2"];
pub const DEFAULT_FABRIC_NODE_TYPES: &[&str] = &["ca", "orderer", "peer"];
pub const DEFAULT_NETWORK_TYPES: &[&str] = &["fabric"];
pub const DEFAULT_HOST_TYPES: &[&str] = &["docker", "kubernetes"];

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(|| {
    ReferenceTables::new(
        DEFAULT_FABRIC_VERSIONS.iter().copied(),
        DEFAULT_FABRIC_NODE_TYPES.iter().copied(),
        DEFAULT_NETWORK_TYPES.iter().copied(),
        DEFAULT_HOST_TYPES.iter().copied(),
    )
});

/// Immutable sets of accepted values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTables {
    fabric_versions: BTreeSet<String>,
    fabric_node_types: BTreeSet<String>,
    network_types: BTreeSet<String>,
    host_types: BTreeSet<String>,
}

impl ReferenceTables {
    /// Build tables from raw values. Network types are stored trimmed and lower-cased,
    /// the same normalization `NetworkType::parse` applies to requests.
    #[must_use]
    pub fn new<V, N, T, H>(fabric_versions: V, fabric_node_types: N, network_types: T, host_types: H) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self {
            fabric_versions: fabric_versions.into_iter().map(Into::into).collect(),
            fabric_node_types: fabric_node_types.into_iter().map(Into::into).collect(),
            network_types: network_types
                .into_iter()
                .map(|t| Into::<String>::into(t).trim().to_lowercase())
                .collect(),
            host_types: host_types.into_iter().map(Into::into).collect(),
        }
    }

    /// The tables compiled into the binary
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn is_fabric_version(&self, version: &str) -> bool {
        self.fabric_versions.contains(version)
    }

    #[must_use]
    pub fn is_fabric_node_type(&self, node_type: &str) -> bool {
        self.fabric_node_types.contains(node_type)
    }

    #[must_use]
    pub fn is_host_type(&self, host_type: &str) -> bool {
        self.host_types.contains(host_type)
    }

    /// Resolve a network type, ignoring case. `None` if it is not registered.
    #[must_use]
    pub fn network_type(&self, raw: &str) -> Option<NetworkType> {
        let parsed = NetworkType::parse(raw);
        self.network_types
            .contains(parsed.as_str())
            .then_some(parsed)
    }

    pub fn fabric_versions(&self) -> impl Iterator<Item = &str> {
        self.fabric_versions.iter().map(String::as_str)
    }

    pub fn fabric_node_types(&self) -> impl Iterator<Item = &str> {
        self.fabric_node_types.iter().map(String::as_str)
    }

    pub fn network_types(&self) -> impl Iterator<Item = &str> {
        self.network_types.iter().map(String::as_str)
    }

    pub fn host_types(&self) -> impl Iterator<Item = &str> {
        self.host_types.iter().map(String::as_str)
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
