//! Wire data model for the identity directory.
//!
//! All read endpoints wrap their payload in a `{"data": ...}` envelope;
//! unknown fields are ignored so newer directory versions stay readable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response envelope used by every directory read endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// An entity alias: the binding of an external principal (under one auth
/// mount) to a canonical entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Remote-assigned, stable, opaque identifier.
    pub id: String,
    /// Identifier of the client in the authentication source.
    pub name: String,
    /// The entity this alias belongs to.
    pub canonical_id: String,
    /// Accessor of the auth mount the alias lives under.
    pub mount_accessor: String,
}

/// The `{id, canonical_id}` pair returned by a create/update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasHandle {
    pub id: String,
    pub canonical_id: String,
}

/// Per-alias attributes in the listing's `key_info` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasInfo {
    pub name: String,
    pub canonical_id: String,
    pub mount_accessor: String,
}

/// The full alias listing: `keys` preserves the server's listing order,
/// `key_info` carries the attributes for each id.
///
/// The pair `(name, mount_accessor)` is expected to be unique among live
/// aliases, but the directory does not enforce it; consumers scanning for a
/// match must iterate `keys` and take the first hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliasListing {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub key_info: HashMap<String, AliasInfo>,
}

impl AliasListing {
    /// Iterate `(id, info)` pairs in the server's listing order.
    ///
    /// Ids present in `keys` but absent from `key_info` are skipped.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, &AliasInfo)> {
        self.keys
            .iter()
            .filter_map(|id| self.key_info.get(id).map(|info| (id.as_str(), info)))
    }

    /// Whether an alias id appears in the listing.
    pub fn contains(&self, alias_id: &str) -> bool {
        self.keys.iter().any(|k| k == alias_id)
    }
}

/// A canonical identity record. Owned entirely by the directory; this crate
/// only ever reads entities.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One mounted authentication backend from the mounts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthMount {
    /// Stable identifier of this mount instance.
    pub accessor: String,
    /// Backend type name, e.g. "userpass".
    #[serde(rename = "type", default)]
    pub mount_type: String,
}

/// Mounted auth backends keyed by path (paths carry a trailing slash,
/// e.g. `"userpass/"`).
pub type AuthMounts = HashMap<String, AuthMount>;

/// Request body for alias create and update mutations.
#[derive(Debug, Clone, Serialize)]
pub struct AliasRequest {
    pub name: String,
    pub canonical_id: String,
    pub mount_accessor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_iterates_in_keys_order() {
        let body = serde_json::json!({
            "keys": ["b", "a"],
            "key_info": {
                "a": {"name": "alice", "canonical_id": "e1", "mount_accessor": "auth_up_1"},
                "b": {"name": "bob", "canonical_id": "e2", "mount_accessor": "auth_up_1"}
            }
        });
        let listing: AliasListing = serde_json::from_value(body).unwrap();

        let order: Vec<&str> = listing.iter_ordered().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert!(listing.contains("a"));
        assert!(!listing.contains("c"));
    }

    #[test]
    fn test_listing_skips_keys_without_info() {
        let body = serde_json::json!({
            "keys": ["a", "ghost"],
            "key_info": {
                "a": {"name": "alice", "canonical_id": "e1", "mount_accessor": "auth_up_1"}
            }
        });
        let listing: AliasListing = serde_json::from_value(body).unwrap();
        assert_eq!(listing.iter_ordered().count(), 1);
        // Still visible to a direct id membership check.
        assert!(listing.contains("ghost"));
    }

    #[test]
    fn test_alias_ignores_unknown_fields() {
        let body = serde_json::json!({
            "id": "al-1",
            "name": "alice",
            "canonical_id": "e1",
            "mount_accessor": "auth_up_1",
            "creation_time": "2026-01-01T00:00:00Z",
            "metadata": null
        });
        let envelope: Envelope<Alias> = serde_json::from_value(
            serde_json::json!({ "data": body }),
        )
        .unwrap();
        assert_eq!(envelope.data.name, "alice");
    }

    #[test]
    fn test_auth_mounts_deserialize() {
        let body = serde_json::json!({
            "token/": {"accessor": "auth_token_abc", "type": "token"},
            "userpass/": {"accessor": "auth_userpass_def", "type": "userpass"}
        });
        let mounts: AuthMounts = serde_json::from_value(body).unwrap();
        assert_eq!(mounts["userpass/"].accessor, "auth_userpass_def");
        assert_eq!(mounts["token/"].mount_type, "token");
    }
}
