//! Reconciliation outcomes and the report shape handed to orchestration.

use idalias_directory::AliasHandle;
use serde::{Deserialize, Serialize};

use crate::error::ReconcileResult;

/// Result of one successful reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Remote state already satisfied the request; no mutation was issued.
    Unchanged,
    /// Exactly one mutation was issued, with the resulting alias handle when
    /// the directory returned one.
    Changed { alias: Option<AliasHandle> },
}

impl Outcome {
    /// Whether remote state was mutated.
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Changed { .. })
    }
}

/// Serializable summary for the invoking orchestration layer:
/// `{changed, data?, failed, msg?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub changed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AliasHandle>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Report {
    /// Shape a reconciliation result for the orchestration boundary. Errors
    /// become `{failed: true, msg}`; they are never retried here.
    pub fn from_result(result: ReconcileResult<Outcome>) -> Self {
        match result {
            Ok(Outcome::Unchanged) => Report {
                changed: false,
                data: None,
                failed: false,
                msg: None,
            },
            Ok(Outcome::Changed { alias }) => Report {
                changed: true,
                data: alias,
                failed: false,
                msg: None,
            },
            Err(err) => Report {
                changed: false,
                data: None,
                failed: true,
                msg: Some(err.to_string()),
            },
        }
    }
}
