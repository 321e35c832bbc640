//! Reconciliation engine: one read-decide-act cycle per invocation.

use idalias_directory::{AliasListing, AliasRequest, DirectoryClient, DirectoryError};
use tracing::{debug, info, warn};

use crate::desired::{AliasState, DesiredAlias};
use crate::error::{ReconcileError, ReconcileResult};
use crate::matcher::find_alias;
use crate::outcome::Outcome;
use crate::resolver::IdentifierResolver;

/// Reconciles a [`DesiredAlias`] against the directory.
///
/// Each [`reconcile`](Reconciler::reconcile) call is an independent,
/// strictly sequential read-then-act sequence issuing at most one mutation.
/// There is no state between invocations, no optimistic locking for the
/// window between the listing read and the mutation, and no internal retry;
/// a failed invocation is safe to re-issue because every path converges.
pub struct Reconciler<C: DirectoryClient> {
    client: C,
}

impl<C: DirectoryClient> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Access the underlying directory client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Reconcile desired against actual state, reporting whether a mutation
    /// was issued.
    ///
    /// Identifier resolution runs before the present/absent branch: the
    /// mount accessor is derived from `auth_type`'s default mount path and
    /// the canonical id from `entity_name` unless supplied explicitly.
    pub async fn reconcile(&self, desired: &DesiredAlias) -> ReconcileResult<Outcome> {
        desired.validate()?;

        let resolver = IdentifierResolver::new(&self.client);
        let mount_accessor = resolver
            .resolve_mount_accessor(&desired.auth_type, desired.mount_accessor.as_deref())
            .await?;
        let canonical_id = resolver
            .resolve_canonical_id(desired.canonical_id.as_deref(), desired.entity_name.as_deref())
            .await?;

        match desired.state {
            AliasState::Present => {
                self.ensure_present(desired, &mount_accessor, &canonical_id)
                    .await
            }
            AliasState::Absent => {
                self.ensure_absent(desired, &mount_accessor, &canonical_id)
                    .await
            }
        }
    }

    // ── Present ───────────────────────────────────────────────────────

    async fn ensure_present(
        &self,
        desired: &DesiredAlias,
        mount_accessor: &str,
        canonical_id: &str,
    ) -> ReconcileResult<Outcome> {
        if let Some(alias_id) = desired.alias_id.as_deref() {
            return self
                .update_by_id(alias_id, desired.name.as_deref(), mount_accessor, canonical_id)
                .await;
        }

        let name = desired
            .name
            .as_deref()
            .ok_or(ReconcileError::MissingReference)?;

        // Discover an existing alias with the same (name, mount) and
        // reconcile it instead of creating a duplicate; canonical_id is the
        // update payload here, not a match key.
        let listing = self.list_aliases_or_empty().await;
        match find_alias(&listing, name, mount_accessor, None) {
            Some(matched_id) => {
                let matched_id = matched_id.to_string();
                debug!(
                    alias_id = %matched_id,
                    name = %name,
                    mount_accessor = %mount_accessor,
                    "existing alias matched, reconciling in place"
                );
                self.update_by_id(&matched_id, Some(name), mount_accessor, canonical_id)
                    .await
            }
            None => self.create(name, mount_accessor, canonical_id).await,
        }
    }

    /// Direct-update path: read the alias, compare canonical ids, update
    /// only on divergence.
    async fn update_by_id(
        &self,
        alias_id: &str,
        desired_name: Option<&str>,
        mount_accessor: &str,
        canonical_id: &str,
    ) -> ReconcileResult<Outcome> {
        let current = match self.client.read_alias(alias_id).await {
            Ok(alias) => alias,
            Err(DirectoryError::NotFound { .. }) => {
                return Err(ReconcileError::AliasNotFound {
                    alias_id: alias_id.to_string(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        if current.canonical_id == canonical_id {
            debug!(alias_id = %alias_id, canonical_id = %canonical_id, "alias already converged");
            return Ok(Outcome::Unchanged);
        }

        let request = AliasRequest {
            name: desired_name.unwrap_or(&current.name).to_string(),
            canonical_id: canonical_id.to_string(),
            mount_accessor: mount_accessor.to_string(),
        };
        let handle = self.client.update_alias(alias_id, &request).await?;

        info!(
            alias_id = %alias_id,
            name = %request.name,
            canonical_id = %canonical_id,
            previous_canonical_id = %current.canonical_id,
            "alias updated"
        );
        Ok(Outcome::Changed { alias: handle })
    }

    async fn create(
        &self,
        name: &str,
        mount_accessor: &str,
        canonical_id: &str,
    ) -> ReconcileResult<Outcome> {
        let request = AliasRequest {
            name: name.to_string(),
            canonical_id: canonical_id.to_string(),
            mount_accessor: mount_accessor.to_string(),
        };
        let handle = self.client.create_alias(&request).await?;

        info!(
            name = %name,
            mount_accessor = %mount_accessor,
            canonical_id = %canonical_id,
            alias_id = handle.as_ref().map(|h| h.id.as_str()).unwrap_or("<none>"),
            "alias created"
        );
        Ok(Outcome::Changed { alias: handle })
    }

    // ── Absent ────────────────────────────────────────────────────────

    async fn ensure_absent(
        &self,
        desired: &DesiredAlias,
        mount_accessor: &str,
        canonical_id: &str,
    ) -> ReconcileResult<Outcome> {
        let listing = self.list_aliases_or_empty().await;

        let target_id = if let Some(alias_id) = desired.alias_id.as_deref() {
            listing.contains(alias_id).then(|| alias_id.to_string())
        } else {
            let name = desired
                .name
                .as_deref()
                .ok_or(ReconcileError::MissingReference)?;
            // Deletion matches on all three of name, mount, and canonical id.
            find_alias(&listing, name, mount_accessor, Some(canonical_id))
                .map(std::string::ToString::to_string)
        };

        match target_id {
            Some(alias_id) => {
                self.client.delete_alias(&alias_id).await?;
                info!(alias_id = %alias_id, "alias deleted");
                Ok(Outcome::Changed { alias: None })
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    // ── Listing policy ────────────────────────────────────────────────

    /// Fetch the full alias listing, absorbing failures as an empty listing.
    ///
    /// This is a deliberate, documented policy: the directory answers 404
    /// when no aliases exist, and the create/delete paths must converge even
    /// when the listing is unavailable (the create path falls through to an
    /// unconditional create, the delete paths to unchanged). Targeted reads
    /// and mutations never get this treatment; their failures propagate.
    async fn list_aliases_or_empty(&self) -> AliasListing {
        match self.client.list_aliases().await {
            Ok(listing) => listing,
            Err(DirectoryError::NotFound { .. }) => {
                debug!("alias listing empty (directory answered not-found)");
                AliasListing::default()
            }
            Err(err) => {
                warn!(
                    error = %err,
                    error_code = err.error_code(),
                    "alias listing failed, treating as empty"
                );
                AliasListing::default()
            }
        }
    }
}
