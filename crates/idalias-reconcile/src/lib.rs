//! Declarative reconciliation of entity aliases against the identity
//! directory.
//!
//! Given a [`DesiredAlias`] (present or absent), the [`Reconciler`] resolves
//! loose identifiers to concrete directory ids, searches existing aliases for
//! a semantic match, and issues at most one create/update/delete so remote
//! state converges on the request. Already-converged state is reported as
//! [`Outcome::Unchanged`] with zero mutations issued.

pub mod desired;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod outcome;
pub mod resolver;

pub use desired::{AliasState, DesiredAlias, UnknownState};
pub use engine::Reconciler;
pub use error::{ReconcileError, ReconcileResult};
pub use matcher::find_alias;
pub use outcome::{Outcome, Report};
pub use resolver::IdentifierResolver;
