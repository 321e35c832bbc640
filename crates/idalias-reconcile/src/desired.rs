//! Desired-state input for one reconciliation attempt.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ReconcileError, ReconcileResult};

/// Whether the alias should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasState {
    #[default]
    Present,
    Absent,
}

impl FromStr for AliasState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AliasState::Present),
            "absent" => Ok(AliasState::Absent),
            other => Err(UnknownState(other.to_string())),
        }
    }
}

/// A state string other than `present` or `absent`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state '{0}', expected 'present' or 'absent'")]
pub struct UnknownState(pub String);

/// Declarative description of the alias that should (or should not) exist.
///
/// At least one of `alias_id`/`name` must be supplied; `alias_id` selects the
/// direct-reference path, `name` the lookup path. The canonical entity is
/// referenced by `canonical_id` or located via `entity_name`, and the auth
/// mount by `mount_accessor` or derived from `auth_type`'s default mount
/// path. Explicit identifiers always win over derived lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredAlias {
    /// Identifier of the client in the authentication source.
    #[serde(default)]
    pub name: Option<String>,

    /// Direct reference to an existing alias.
    #[serde(default)]
    pub alias_id: Option<String>,

    /// Entity name, resolved to a canonical id when `canonical_id` is absent.
    #[serde(default)]
    pub entity_name: Option<String>,

    /// The entity the alias should belong to.
    #[serde(default)]
    pub canonical_id: Option<String>,

    /// Accessor of the auth mount the alias should belong to.
    #[serde(default)]
    pub mount_accessor: Option<String>,

    /// Auth backend type, used to derive `mount_accessor` from the default
    /// mount path when no accessor is supplied.
    #[serde(default = "default_auth_type")]
    pub auth_type: String,

    /// Whether the alias should exist.
    #[serde(default)]
    pub state: AliasState,
}

fn default_auth_type() -> String {
    "token".to_string()
}

impl Default for DesiredAlias {
    fn default() -> Self {
        Self {
            name: None,
            alias_id: None,
            entity_name: None,
            canonical_id: None,
            mount_accessor: None,
            auth_type: default_auth_type(),
            state: AliasState::default(),
        }
    }
}

impl DesiredAlias {
    /// Desired-present alias for `name` bound to the entity named
    /// `entity_name`, under the default auth mount.
    pub fn present(name: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            entity_name: Some(entity_name.into()),
            ..Self::default()
        }
    }

    /// Validate completeness before any directory call is made.
    ///
    /// Both states need an alias reference and a canonical reference, since
    /// canonical-id resolution runs before the present/absent branch.
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.alias_id.is_none() && self.name.is_none() {
            return Err(ReconcileError::MissingReference);
        }
        if self.canonical_id.is_none() && self.entity_name.is_none() {
            return Err(ReconcileError::MissingCanonicalReference);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse() {
        assert_eq!("present".parse::<AliasState>().unwrap(), AliasState::Present);
        assert_eq!("absent".parse::<AliasState>().unwrap(), AliasState::Absent);

        let err = "deleted".parse::<AliasState>().unwrap_err();
        assert!(err.to_string().contains("deleted"));
    }

    #[test]
    fn test_state_serde_rejects_unknown() {
        let ok: AliasState = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(ok, AliasState::Absent);
        assert!(serde_json::from_str::<AliasState>("\"gone\"").is_err());
    }

    #[test]
    fn test_validate_requires_alias_reference() {
        let desired = DesiredAlias {
            canonical_id: Some("e-1".to_string()),
            ..DesiredAlias::default()
        };
        assert!(matches!(
            desired.validate(),
            Err(ReconcileError::MissingReference)
        ));
    }

    #[test]
    fn test_validate_requires_canonical_reference() {
        let desired = DesiredAlias {
            name: Some("alice".to_string()),
            ..DesiredAlias::default()
        };
        assert!(matches!(
            desired.validate(),
            Err(ReconcileError::MissingCanonicalReference)
        ));
    }

    #[test]
    fn test_default_auth_type_is_token() {
        assert_eq!(DesiredAlias::default().auth_type, "token");
    }

    #[test]
    fn test_defaults() {
        let desired: DesiredAlias = serde_json::from_value(serde_json::json!({
            "name": "alice",
            "entity_name": "alice"
        }))
        .unwrap();
        assert_eq!(desired.auth_type, "token");
        assert_eq!(desired.state, AliasState::Present);
        assert!(desired.validate().is_ok());
    }
}
