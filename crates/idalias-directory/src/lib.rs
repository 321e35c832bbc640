//! Typed client for the identity directory's entity, alias, and auth-mount
//! endpoints.
//!
//! The [`DirectoryClient`] trait defines the primitive operations the
//! reconciliation core consumes; [`HttpDirectoryClient`] is the production
//! implementation over the directory's HTTP API.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{DirectoryClient, HttpDirectoryClient};
pub use config::DirectoryConfig;
pub use error::{DirectoryError, DirectoryResult};
pub use types::{
    Alias, AliasHandle, AliasInfo, AliasListing, AliasRequest, AuthMount, AuthMounts, Entity,
};
