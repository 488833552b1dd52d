//! Test tooling for the Warden client.
//!
//! Provides [`MiniWarden`], an in-process double of the authorization
//! service with an explicit `start`/`stop`/`pause`/`resume` lifecycle, and
//! [`MiniConnector`], a `warden_client` connector that routes to one or more
//! registered doubles.
//!
//! The double implements the client-facing transport seam directly — no
//! sockets — so lifecycle tests (restart, transient outage, failover across
//! replicas) run hermetically and fast.
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden_client::{ClientConfig, HaClient};
//! use warden_test::MiniWarden;
//!
//! let a = MiniWarden::new();
//! let b = MiniWarden::new();
//! for warden in [&a, &b] {
//!     warden.add_admin("test-admin");
//!     warden.start();
//! }
//!
//! let ha = HaClient::with_connector(Arc::new(a.connector().with_server(&b)));
//! ha.start(
//!     vec![a.address().clone(), b.address().clone()],
//!     ClientConfig::new(),
//! )
//! .await?;
//!
//! a.stop(); // the next execute fails over to b transparently
//! ```

mod connector;
mod server;
mod store;

pub use connector::MiniConnector;
pub use server::MiniWarden;
