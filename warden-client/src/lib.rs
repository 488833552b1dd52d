//! High-availability client for the Warden role-based authorization service.
//!
//! Warden is the system of record for roles, groups and privilege grants.
//! This crate provides the client side: an authenticated gRPC transport, a
//! typed client with a uniform error taxonomy, and a failover wrapper that
//! keeps operations flowing while the service is restarted, paused or moved
//! between replicas.
//!
//! # Setup
//!
//! ```ignore
//! use warden_client::{ClientConfig, HaClient, Privilege, ServerAddress};
//!
//! let ha = HaClient::new();
//! ha.start(
//!     vec![
//!         ServerAddress::new("warden-1.internal", 8038),
//!         ServerAddress::new("warden-2.internal", 8038),
//!     ],
//!     ClientConfig::new().with_authentication("warden"),
//! )
//! .await?;
//!
//! ha.execute(|client| async move {
//!     client.create_role("admin", "analyst").await?;
//!     client
//!         .alter_role_grant_privilege(
//!             "admin",
//!             "analyst",
//!             Privilege::new("server1", "SELECT").with_db("metrics"),
//!         )
//!         .await
//! })
//! .await?;
//! ```
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **[`Connector`](transport::Connector)** / **[`GrpcConnector`]** — opens
//!   one authenticated channel to one replica: a single attempt, including
//!   the security handshake when authentication is enabled.
//! - **[`WardenClient`]** — the typed client bound to one replica: one
//!   method per service operation, service failure codes mapped into
//!   [`WardenError`].
//! - **[`HaClient`]** — the failover wrapper: candidate set, round-robin
//!   reconnect, bounded retry. Connectivity faults are retried against other
//!   candidates; application errors (duplicate role, missing role, denied
//!   permission) are returned immediately.
//!
//! # Errors
//!
//! Every operation returns [`WardenError`], a closed taxonomy. Callers
//! branch on the variant; [`WardenError::Unavailable`] is the only way a
//! connectivity problem surfaces through [`HaClient::execute`], and it
//! carries the last underlying error.
//!
//! # Testing
//!
//! The companion `warden-test` crate provides `MiniWarden`, an in-process
//! service double with a `start`/`stop`/`pause`/`resume` lifecycle, and a
//! connector that routes to it. Point [`HaClient::with_connector`] at it to
//! exercise failover without a network.

pub mod address;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ha;
pub mod pb;
pub mod transport;
pub mod types;

// Re-exports
pub use address::ServerAddress;
pub use client::{ConnectionState, WardenClient};
pub use config::{ClientConfig, RetryPolicy};
pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::WardenError;
pub use ha::HaClient;
pub use transport::{Connector, GrpcConnector, PolicyTransport};
pub use types::{AuthorizableScope, Privilege};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::address::ServerAddress;
    pub use crate::client::WardenClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::WardenError;
    pub use crate::ha::HaClient;
    pub use crate::types::{AuthorizableScope, Privilege};
}
