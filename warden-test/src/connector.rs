//! A [`Connector`] that routes to in-process [`MiniWarden`] servers.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tonic::Status;
use warden_client::config::ClientConfig;
use warden_client::credentials::CredentialSource;
use warden_client::error::WardenError;
use warden_client::pb;
use warden_client::transport::{Connector, PolicyTransport};
use warden_client::{AuthorizableScope, Privilege, ServerAddress};

use crate::server::{lock, MiniWarden, Shared};
use crate::store::PolicyStore;

/// Routes connect attempts by address to registered [`MiniWarden`]s,
/// emulating the security handshake the production connector performs.
///
/// Unregistered addresses refuse connections, so a candidate list can mix
/// live and dead replicas.
pub struct MiniConnector {
    servers: HashMap<ServerAddress, Arc<Shared>>,
    credentials: Option<Arc<dyn CredentialSource>>,
}

impl MiniConnector {
    pub fn new() -> Self {
        Self {
            servers: HashMap::new(),
            credentials: None,
        }
    }

    /// Register another candidate server.
    pub fn with_server(mut self, server: &MiniWarden) -> Self {
        self.servers
            .insert(server.address().clone(), Arc::clone(&server.shared));
        self
    }

    /// Credential presented during the handshake when the client config
    /// enables authentication.
    pub fn with_credentials(mut self, credentials: impl CredentialSource) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }
}

impl Default for MiniConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for MiniConnector {
    fn connect<'a>(
        &'a self,
        address: &'a ServerAddress,
        config: &'a ClientConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn PolicyTransport>, WardenError>> + Send + 'a>>
    {
        Box::pin(async move {
            let shared = self.servers.get(address).ok_or_else(|| {
                WardenError::Connect(format!("{address}: connection refused"))
            })?;

            let epoch = {
                let lifecycle = lock(&shared.lifecycle);
                if !lifecycle.running {
                    return Err(WardenError::Connect(format!(
                        "{address}: connection refused"
                    )));
                }
                if lifecycle.paused {
                    return Err(WardenError::Connect(format!(
                        "{address}: connect timed out"
                    )));
                }
                lifecycle.epoch
            };

            let expectation = lock(&shared.auth);
            if config.enable_authentication {
                if let Some(expectation) = expectation.as_ref() {
                    let token = match &self.credentials {
                        Some(credentials) => credentials.token()?,
                        None => {
                            return Err(WardenError::AuthenticationFailed(
                                "no credential source configured".into(),
                            ))
                        }
                    };
                    if token != expectation.token {
                        return Err(WardenError::AuthenticationFailed(
                            "invalid credential".into(),
                        ));
                    }
                    if config.service_principal != expectation.service_principal {
                        return Err(WardenError::AuthenticationFailed(format!(
                            "service principal mismatch: expected '{}', server reported '{}'",
                            config.service_principal, expectation.service_principal
                        )));
                    }
                }
            } else if expectation.is_some() {
                return Err(WardenError::AuthenticationFailed(
                    "server requires authentication".into(),
                ));
            }
            drop(expectation);

            Ok(Arc::new(MiniTransport {
                shared: Arc::clone(shared),
                epoch,
            }) as Arc<dyn PolicyTransport>)
        })
    }
}

/// A transport bound to one incarnation of a [`MiniWarden`].
struct MiniTransport {
    shared: Arc<Shared>,
    epoch: u64,
}

impl MiniTransport {
    fn call<T>(
        &self,
        op: impl FnOnce(&mut PolicyStore) -> Result<T, Status>,
    ) -> Result<T, Status> {
        {
            let lifecycle = lock(&self.shared.lifecycle);
            if !lifecycle.running || lifecycle.paused || lifecycle.epoch != self.epoch {
                return Err(Status::unavailable("authorization service is unavailable"));
            }
        }
        op(&mut lock(&self.shared.store))
    }
}

impl PolicyTransport for MiniTransport {
    fn create_role(
        &self,
        request: pb::CreateRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::CreateRoleResponse, Status>> + Send + '_>> {
        let result = self.call(|store| {
            store.create_role(&request.requestor, &request.role_name)?;
            Ok(pb::CreateRoleResponse {})
        });
        Box::pin(async move { result })
    }

    fn drop_role(
        &self,
        request: pb::DropRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::DropRoleResponse, Status>> + Send + '_>> {
        let result = self.call(|store| {
            store.drop_role(&request.requestor, &request.role_name)?;
            Ok(pb::DropRoleResponse {})
        });
        Box::pin(async move { result })
    }

    fn list_privileges_by_user(
        &self,
        request: pb::ListPrivilegesByUserRequest,
    ) -> Pin<
        Box<dyn Future<Output = Result<pb::ListPrivilegesByUserResponse, Status>> + Send + '_>,
    > {
        let result = self.call(|store| {
            let scope = request.scope.map(AuthorizableScope::from);
            let privileges = store.list_privileges_by_user(
                &request.requestor,
                &request.principal,
                scope.as_ref(),
            )?;
            Ok(pb::ListPrivilegesByUserResponse {
                privileges: privileges
                    .into_iter()
                    .map(pb::PrivilegeEntry::from)
                    .collect(),
            })
        });
        Box::pin(async move { result })
    }

    fn alter_role_add_groups(
        &self,
        request: pb::AlterRoleAddGroupsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::AlterRoleAddGroupsResponse, Status>> + Send + '_>>
    {
        let result = self.call(|store| {
            store.add_groups(&request.requestor, &request.role_name, &request.groups)?;
            Ok(pb::AlterRoleAddGroupsResponse {})
        });
        Box::pin(async move { result })
    }

    fn alter_role_grant_privilege(
        &self,
        request: pb::AlterRoleGrantPrivilegeRequest,
    ) -> Pin<
        Box<dyn Future<Output = Result<pb::AlterRoleGrantPrivilegeResponse, Status>> + Send + '_>,
    > {
        let result = self.call(|store| {
            store.grant_privilege(
                &request.requestor,
                &request.role_name,
                request.privilege.map(Privilege::from),
            )?;
            Ok(pb::AlterRoleGrantPrivilegeResponse {})
        });
        Box::pin(async move { result })
    }
}
