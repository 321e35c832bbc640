//! Identifier resolution: loose caller-supplied names to concrete directory
//! identifiers.

use idalias_directory::{DirectoryClient, DirectoryError};
use tracing::debug;

use crate::error::{ReconcileError, ReconcileResult};

/// Resolves auth-method types and entity names into the mount accessor and
/// canonical id the engine operates on. Explicit input always wins over a
/// derived lookup.
pub struct IdentifierResolver<'a, C: DirectoryClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: DirectoryClient + ?Sized> IdentifierResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Produce a concrete mount accessor.
    ///
    /// A supplied accessor is used unchanged. Otherwise the mounted auth
    /// methods are read and the entry at path `"<auth_type>/"` provides the
    /// accessor. This assumes the backend is mounted at its default path;
    /// callers with non-default paths must supply the accessor explicitly.
    pub async fn resolve_mount_accessor(
        &self,
        auth_type: &str,
        explicit: Option<&str>,
    ) -> ReconcileResult<String> {
        if let Some(accessor) = explicit {
            return Ok(accessor.to_string());
        }

        let mounts = self.client.read_auth_mounts().await?;
        let path = format!("{auth_type}/");
        match mounts.get(&path) {
            Some(mount) => {
                debug!(
                    auth_type = %auth_type,
                    mount_accessor = %mount.accessor,
                    "resolved auth mount from default path"
                );
                Ok(mount.accessor.clone())
            }
            None => Err(ReconcileError::AuthMethodNotFound {
                auth_type: auth_type.to_string(),
            }),
        }
    }

    /// Produce a concrete canonical entity id.
    ///
    /// A supplied id is used unchanged. Otherwise `entity_name` is required
    /// and looked up in the directory; a missing entity is a resolution
    /// failure, any other read failure surfaces as a directory error.
    pub async fn resolve_canonical_id(
        &self,
        canonical_id: Option<&str>,
        entity_name: Option<&str>,
    ) -> ReconcileResult<String> {
        if let Some(id) = canonical_id {
            return Ok(id.to_string());
        }

        let entity_name = entity_name.ok_or(ReconcileError::MissingCanonicalReference)?;
        match self.client.read_entity_by_name(entity_name).await {
            Ok(entity) => {
                debug!(
                    entity_name = %entity_name,
                    canonical_id = %entity.id,
                    "resolved entity by name"
                );
                Ok(entity.id)
            }
            Err(DirectoryError::NotFound { .. }) => Err(ReconcileError::EntityNotFound {
                entity_name: entity_name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}
