//! Typed client for the Warden authorization service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::address::ServerAddress;
use crate::config::ClientConfig;
use crate::error::WardenError;
use crate::pb;
use crate::transport::{Connector, PolicyTransport};
use crate::types::{AuthorizableScope, Privilege};

/// Lifecycle of a [`WardenClient`]'s underlying transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport; `start` has not run (or `stop` has).
    Unconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The transport is open and operations may be issued.
    Ready,
    /// The last connection attempt failed.
    Failed,
}

struct ClientState {
    state: ConnectionState,
    transport: Option<Arc<dyn PolicyTransport>>,
}

/// A client bound to one authorization-service replica.
///
/// Owns at most one transport at a time; reconnecting always drops the prior
/// transport before opening a new one. Operations fail with
/// [`WardenError::NotConnected`] unless the client is
/// [`Ready`](ConnectionState::Ready).
///
/// Every operation maps service-reported failures into the uniform
/// [`WardenError`] taxonomy and reports transport faults as
/// [`WardenError::Connectivity`], which is what the HA wrapper keys its
/// failover decision on. The client holds no cache of prior results.
pub struct WardenClient {
    address: ServerAddress,
    config: ClientConfig,
    connector: Arc<dyn Connector>,
    inner: Mutex<ClientState>,
}

impl WardenClient {
    /// Create an unconnected client; call [`start`](Self::start) before
    /// issuing operations.
    pub fn new(address: ServerAddress, config: ClientConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            address,
            config,
            connector,
            inner: Mutex::new(ClientState {
                state: ConnectionState::Unconnected,
                transport: None,
            }),
        }
    }

    /// The replica this client is bound to.
    pub fn address(&self) -> &ServerAddress {
        &self.address
    }

    pub fn state(&self) -> ConnectionState {
        self.lock().state
    }

    /// Open the transport. A no-op when already ready; otherwise one connect
    /// attempt, reported verbatim.
    pub async fn start(&self) -> Result<(), WardenError> {
        self.config.validate()?;
        {
            let mut inner = self.lock();
            if inner.state == ConnectionState::Ready {
                return Ok(());
            }
            inner.state = ConnectionState::Connecting;
        }
        match self.connector.connect(&self.address, &self.config).await {
            Ok(transport) => {
                let mut inner = self.lock();
                inner.transport = Some(transport);
                inner.state = ConnectionState::Ready;
                debug!(server = %self.address, "client connected");
                Ok(())
            }
            Err(err) => {
                let mut inner = self.lock();
                inner.transport = None;
                inner.state = ConnectionState::Failed;
                Err(err)
            }
        }
    }

    /// Drop the transport. Idempotent; stopping an unconnected client is a
    /// no-op.
    pub fn stop(&self) {
        let mut inner = self.lock();
        inner.transport = None;
        inner.state = ConnectionState::Unconnected;
    }

    /// Create a role named `role` on behalf of `requestor`.
    pub async fn create_role(&self, requestor: &str, role: &str) -> Result<(), WardenError> {
        let transport = self.transport()?;
        let request = pb::CreateRoleRequest {
            requestor: requestor.to_string(),
            role_name: role.to_string(),
        };
        transport.create_role(request).await?;
        Ok(())
    }

    /// Drop the role named `role` on behalf of `requestor`.
    pub async fn drop_role(&self, requestor: &str, role: &str) -> Result<(), WardenError> {
        let transport = self.transport()?;
        let request = pb::DropRoleRequest {
            requestor: requestor.to_string(),
            role_name: role.to_string(),
        };
        transport.drop_role(request).await?;
        Ok(())
    }

    /// List the privileges granted to `principal` within `scope`.
    ///
    /// A principal with no grants yields an empty list, not an error.
    pub async fn list_privileges_by_user(
        &self,
        requestor: &str,
        scope: &AuthorizableScope,
        principal: &str,
    ) -> Result<Vec<Privilege>, WardenError> {
        let transport = self.transport()?;
        let request = pb::ListPrivilegesByUserRequest {
            requestor: requestor.to_string(),
            principal: principal.to_string(),
            scope: Some(scope.clone().into()),
        };
        let response = transport.list_privileges_by_user(request).await?;
        Ok(response.privileges.into_iter().map(Privilege::from).collect())
    }

    /// Attach `groups` to the role named `role`.
    pub async fn alter_role_add_groups(
        &self,
        requestor: &str,
        role: &str,
        groups: &[String],
    ) -> Result<(), WardenError> {
        let transport = self.transport()?;
        let request = pb::AlterRoleAddGroupsRequest {
            requestor: requestor.to_string(),
            role_name: role.to_string(),
            groups: groups.to_vec(),
        };
        transport.alter_role_add_groups(request).await?;
        Ok(())
    }

    /// Grant `privilege` to the role named `role`.
    pub async fn alter_role_grant_privilege(
        &self,
        requestor: &str,
        role: &str,
        privilege: Privilege,
    ) -> Result<(), WardenError> {
        let transport = self.transport()?;
        let request = pb::AlterRoleGrantPrivilegeRequest {
            requestor: requestor.to_string(),
            role_name: role.to_string(),
            privilege: Some(privilege.into()),
        };
        transport.alter_role_grant_privilege(request).await?;
        Ok(())
    }

    /// The active transport, or `NotConnected`. The lock is released before
    /// the caller awaits anything.
    fn transport(&self) -> Result<Arc<dyn PolicyTransport>, WardenError> {
        let inner = self.lock();
        match (&inner.state, &inner.transport) {
            (ConnectionState::Ready, Some(transport)) => Ok(Arc::clone(transport)),
            _ => Err(WardenError::NotConnected),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
