//! Authenticated transport to a single authorization-service replica.
//!
//! [`Connector`] is the seam between the client and the wire — implement it
//! to plug in a custom transport (an in-process double, a proxy, etc.).
//!
//! Provided implementation: [`GrpcConnector`], the production tonic client.
//! One `connect` call makes exactly one attempt; retry and failover live in
//! the HA wrapper, never here.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Endpoint;
use tracing::debug;

use crate::address::ServerAddress;
use crate::config::ClientConfig;
use crate::credentials::{CredentialSource, EnvCredentials};
use crate::error::WardenError;
use crate::pb;
use crate::pb::policy_service_client::PolicyServiceClient;

/// An open, authenticated channel to one replica.
///
/// One method per wire operation. Transports pass the service's raw status
/// through untouched; the typed client owns the mapping into the uniform
/// error taxonomy. Dropping the transport closes the channel.
pub trait PolicyTransport: Send + Sync {
    fn create_role(
        &self,
        request: pb::CreateRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::CreateRoleResponse, tonic::Status>> + Send + '_>>;

    fn drop_role(
        &self,
        request: pb::DropRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::DropRoleResponse, tonic::Status>> + Send + '_>>;

    fn list_privileges_by_user(
        &self,
        request: pb::ListPrivilegesByUserRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::ListPrivilegesByUserResponse, tonic::Status>>
                + Send
                + '_,
        >,
    >;

    fn alter_role_add_groups(
        &self,
        request: pb::AlterRoleAddGroupsRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::AlterRoleAddGroupsResponse, tonic::Status>>
                + Send
                + '_,
        >,
    >;

    fn alter_role_grant_privilege(
        &self,
        request: pb::AlterRoleGrantPrivilegeRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::AlterRoleGrantPrivilegeResponse, tonic::Status>>
                + Send
                + '_,
        >,
    >;
}

/// Opens transports to a replica: one attempt, success or failure reported
/// upward.
pub trait Connector: Send + Sync + 'static {
    fn connect<'a>(
        &'a self,
        address: &'a ServerAddress,
        config: &'a ClientConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn PolicyTransport>, WardenError>> + Send + 'a>>;
}

// ── GrpcConnector ──────────────────────────────────────────────────────

/// Production connector: opens a tonic channel and, when authentication is
/// enabled, performs the security handshake before the transport is handed
/// out.
///
/// The handshake presents the credential from the [`CredentialSource`] and
/// verifies the principal the server reports against
/// `config.service_principal`. Rejected or missing credentials and principal
/// mismatches yield [`WardenError::AuthenticationFailed`]; plain
/// connectivity problems yield [`WardenError::Connect`].
pub struct GrpcConnector {
    credentials: Arc<dyn CredentialSource>,
}

impl GrpcConnector {
    /// Connector reading credentials from the environment (see
    /// [`EnvCredentials`]).
    pub fn new() -> Self {
        Self::with_credentials(EnvCredentials::default())
    }

    /// Connector using a custom credential source.
    pub fn with_credentials(credentials: impl CredentialSource) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl Default for GrpcConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for GrpcConnector {
    fn connect<'a>(
        &'a self,
        address: &'a ServerAddress,
        config: &'a ClientConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn PolicyTransport>, WardenError>> + Send + 'a>>
    {
        Box::pin(async move {
            let endpoint = Endpoint::from_shared(format!("http://{address}"))
                .map_err(|e| {
                    WardenError::InvalidConfig(format!("invalid server address '{address}': {e}"))
                })?
                .connect_timeout(config.connect_timeout())
                .timeout(config.rpc_timeout());

            let channel = endpoint
                .connect()
                .await
                .map_err(|e| WardenError::Connect(format!("{address}: {e}")))?;
            debug!(server = %address, "opened channel to authorization service");

            let mut client = PolicyServiceClient::new(channel);
            let mut bearer = None;
            if config.enable_authentication {
                bearer = Some(handshake(&mut client, config, &*self.credentials).await?);
            }

            Ok(Arc::new(GrpcTransport { client, bearer }) as Arc<dyn PolicyTransport>)
        })
    }
}

/// Run the security handshake and return the metadata value to attach to
/// every subsequent request.
async fn handshake(
    client: &mut PolicyServiceClient<tonic::transport::Channel>,
    config: &ClientConfig,
    credentials: &dyn CredentialSource,
) -> Result<MetadataValue<Ascii>, WardenError> {
    let token = credentials.token()?;
    let request = pb::HandshakeRequest {
        token: token.clone(),
        service_principal: config.service_principal.clone(),
    };
    let response = client.handshake(request).await.map_err(|status| {
        match status.code() {
            tonic::Code::Unauthenticated | tonic::Code::PermissionDenied => {
                WardenError::AuthenticationFailed(status.message().to_string())
            }
            code => WardenError::Connect(format!(
                "handshake failed: {} ({code:?})",
                status.message()
            )),
        }
    })?;

    let principal = response.into_inner().principal;
    if principal != config.service_principal {
        return Err(WardenError::AuthenticationFailed(format!(
            "service principal mismatch: expected '{}', server reported '{principal}'",
            config.service_principal
        )));
    }
    debug!(principal = %principal, "authenticated to authorization service");

    format!("Bearer {token}").parse().map_err(|e| {
        WardenError::AuthenticationFailed(format!(
            "credential is not usable as request metadata: {e}"
        ))
    })
}

/// The channel plus the session credential established by the handshake.
struct GrpcTransport {
    client: PolicyServiceClient<tonic::transport::Channel>,
    bearer: Option<MetadataValue<Ascii>>,
}

impl GrpcTransport {
    /// Build a request, injecting the session credential if present.
    fn authed<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(bearer) = &self.bearer {
            request.metadata_mut().insert("authorization", bearer.clone());
        }
        request
    }
}

impl PolicyTransport for GrpcTransport {
    fn create_role(
        &self,
        request: pb::CreateRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::CreateRoleResponse, tonic::Status>> + Send + '_>>
    {
        // Tonic clients are cheap to clone (shared HTTP/2 channel).
        let mut client = self.client.clone();
        let request = self.authed(request);
        Box::pin(async move { client.create_role(request).await.map(|r| r.into_inner()) })
    }

    fn drop_role(
        &self,
        request: pb::DropRoleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<pb::DropRoleResponse, tonic::Status>> + Send + '_>>
    {
        let mut client = self.client.clone();
        let request = self.authed(request);
        Box::pin(async move { client.drop_role(request).await.map(|r| r.into_inner()) })
    }

    fn list_privileges_by_user(
        &self,
        request: pb::ListPrivilegesByUserRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::ListPrivilegesByUserResponse, tonic::Status>>
                + Send
                + '_,
        >,
    > {
        let mut client = self.client.clone();
        let request = self.authed(request);
        Box::pin(async move {
            client
                .list_privileges_by_user(request)
                .await
                .map(|r| r.into_inner())
        })
    }

    fn alter_role_add_groups(
        &self,
        request: pb::AlterRoleAddGroupsRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::AlterRoleAddGroupsResponse, tonic::Status>>
                + Send
                + '_,
        >,
    > {
        let mut client = self.client.clone();
        let request = self.authed(request);
        Box::pin(async move {
            client
                .alter_role_add_groups(request)
                .await
                .map(|r| r.into_inner())
        })
    }

    fn alter_role_grant_privilege(
        &self,
        request: pb::AlterRoleGrantPrivilegeRequest,
    ) -> Pin<
        Box<
            dyn Future<Output = Result<pb::AlterRoleGrantPrivilegeResponse, tonic::Status>>
                + Send
                + '_,
        >,
    > {
        let mut client = self.client.clone();
        let request = self.authed(request);
        Box::pin(async move {
            client
                .alter_role_grant_privilege(request)
                .await
                .map(|r| r.into_inner())
        })
    }
}
