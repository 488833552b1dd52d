//! The in-process authorization-service double.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use warden_client::ServerAddress;

use crate::connector::MiniConnector;
use crate::store::PolicyStore;

// Synthetic addresses only have to be unique per process; nothing binds
// a socket to them.
static NEXT_PORT: AtomicU16 = AtomicU16::new(42_000);

pub(crate) struct Lifecycle {
    pub(crate) running: bool,
    pub(crate) paused: bool,
    /// Bumped on every `start`, so transports opened against a previous
    /// incarnation of the service go dead after a restart.
    pub(crate) epoch: u64,
}

pub(crate) struct AuthExpectation {
    pub(crate) service_principal: String,
    pub(crate) token: String,
}

pub(crate) struct Shared {
    pub(crate) address: ServerAddress,
    pub(crate) lifecycle: Mutex<Lifecycle>,
    pub(crate) store: Mutex<PolicyStore>,
    pub(crate) auth: Mutex<Option<AuthExpectation>>,
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-process double of the Warden authorization service.
///
/// Carries an explicit lifecycle contract — [`start`](Self::start),
/// [`stop`](Self::stop), [`pause`](Self::pause), [`resume`](Self::resume) —
/// so tests can script restarts and transient outages. Connect attempts and
/// in-flight calls observe the lifecycle the way a real deployment would:
/// a stopped or paused server refuses connections, calls against a paused
/// server fail as unavailable, and a restart invalidates every transport
/// opened before it.
///
/// The policy semantics live in an in-memory store seeded through
/// [`add_admin`](Self::add_admin) and
/// [`add_group_mapping`](Self::add_group_mapping).
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use warden_client::{ClientConfig, HaClient};
/// use warden_test::MiniWarden;
///
/// let warden = MiniWarden::new();
/// warden.add_admin("test-admin");
/// warden.start();
///
/// let ha = HaClient::with_connector(Arc::new(warden.connector()));
/// ha.start(vec![warden.address().clone()], ClientConfig::new()).await?;
/// ```
#[derive(Clone)]
pub struct MiniWarden {
    pub(crate) shared: Arc<Shared>,
}

impl MiniWarden {
    /// A new, stopped service double with a unique synthetic address.
    pub fn new() -> Self {
        let port = NEXT_PORT.fetch_add(1, Ordering::Relaxed);
        Self {
            shared: Arc::new(Shared {
                address: ServerAddress::new("127.0.0.1", port),
                lifecycle: Mutex::new(Lifecycle {
                    running: false,
                    paused: false,
                    epoch: 0,
                }),
                store: Mutex::new(PolicyStore::default()),
                auth: Mutex::new(None),
            }),
        }
    }

    pub fn address(&self) -> &ServerAddress {
        &self.shared.address
    }

    /// Require the security handshake: clients must present `token` and
    /// expect the service to run as `service_principal`.
    pub fn enable_authentication(
        &self,
        service_principal: impl Into<String>,
        token: impl Into<String>,
    ) {
        *lock(&self.shared.auth) = Some(AuthExpectation {
            service_principal: service_principal.into(),
            token: token.into(),
        });
    }

    /// Start (or restart) the service. A restart invalidates transports
    /// opened against the previous incarnation.
    pub fn start(&self) {
        let mut lifecycle = lock(&self.shared.lifecycle);
        lifecycle.running = true;
        lifecycle.paused = false;
        lifecycle.epoch += 1;
        debug!(server = %self.shared.address, "mini warden started");
    }

    /// Stop the service; connect attempts are refused until `start`.
    /// Idempotent.
    pub fn stop(&self) {
        let mut lifecycle = lock(&self.shared.lifecycle);
        lifecycle.running = false;
        debug!(server = %self.shared.address, "mini warden stopped");
    }

    /// Pause the service: existing transports stay up but every call fails
    /// as unavailable, and new connections time out, until `resume`.
    pub fn pause(&self) {
        let mut lifecycle = lock(&self.shared.lifecycle);
        if lifecycle.running {
            lifecycle.paused = true;
            debug!(server = %self.shared.address, "mini warden paused");
        }
    }

    pub fn resume(&self) {
        let mut lifecycle = lock(&self.shared.lifecycle);
        lifecycle.paused = false;
        debug!(server = %self.shared.address, "mini warden resumed");
    }

    /// Register `user` as a service administrator.
    pub fn add_admin(&self, user: &str) {
        lock(&self.shared.store).add_admin(user);
    }

    /// Map `user` into `group` so privilege listings can resolve it.
    pub fn add_group_mapping(&self, user: &str, group: &str) {
        lock(&self.shared.store).add_group_mapping(user, group);
    }

    /// Test introspection: whether a role currently exists on this replica.
    pub fn has_role(&self, role: &str) -> bool {
        lock(&self.shared.store).has_role(role)
    }

    /// A connector routing to this server alone. Chain
    /// [`MiniConnector::with_server`] to add more candidates.
    pub fn connector(&self) -> MiniConnector {
        MiniConnector::new().with_server(self)
    }
}

impl Default for MiniWarden {
    fn default() -> Self {
        Self::new()
    }
}
