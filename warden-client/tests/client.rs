//! Typed client against the in-process service double: operation semantics
//! and error mapping.

use std::sync::Arc;

use warden_client::{
    AuthorizableScope, ClientConfig, ConnectionState, Privilege, StaticCredentials, WardenClient,
    WardenError,
};
use warden_test::MiniWarden;

fn seeded() -> MiniWarden {
    let warden = MiniWarden::new();
    warden.add_admin("test-admin");
    warden.add_group_mapping("test-user", "user");
    warden.start();
    warden
}

fn client_for(warden: &MiniWarden) -> WardenClient {
    WardenClient::new(
        warden.address().clone(),
        ClientConfig::new(),
        Arc::new(warden.connector()),
    )
}

#[tokio::test]
async fn test_create_drop_role() {
    let warden = seeded();
    let client = client_for(&warden);
    client.start().await.unwrap();

    // Create a role, then attempt to create it again.
    client.create_role("test-admin", "viewer").await.unwrap();
    let err = client.create_role("test-admin", "viewer").await.unwrap_err();
    assert!(matches!(err, WardenError::AlreadyExists(_)), "{err}");

    // A non-admin user can neither create nor drop.
    let err = client
        .create_role("joe-interloper", "fuzz")
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");
    let err = client
        .drop_role("joe-interloper", "viewer")
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    // Drop the role, then attempt to drop it again.
    client.drop_role("test-admin", "viewer").await.unwrap();
    let err = client.drop_role("test-admin", "viewer").await.unwrap_err();
    assert!(matches!(err, WardenError::NotFound(_)), "{err}");
}

#[tokio::test]
async fn test_list_privileges_by_user() {
    let warden = seeded();
    let client = client_for(&warden);
    client.start().await.unwrap();

    let scope = AuthorizableScope::server("server1").with_db("db1");

    // A non-admin requestor may not list privileges.
    let err = client
        .list_privileges_by_user("joe-interloper", &scope, "test-user")
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    // Nor may a requestor the service cannot resolve groups for.
    let err = client
        .list_privileges_by_user("user-without-mapping", &scope, "test-user")
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    // A principal without a group mapping cannot be resolved either.
    let err = client
        .list_privileges_by_user("test-admin", &scope, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    // A resolvable principal with no grants yields an empty list.
    let privileges = client
        .list_privileges_by_user("test-admin", &scope, "test-user")
        .await
        .unwrap();
    assert!(privileges.is_empty());

    // Grant a privilege through a role attached to the principal's group
    // and it shows up in the listing.
    client.create_role("test-admin", "viewer").await.unwrap();
    client
        .alter_role_add_groups("test-admin", "viewer", &["user".to_string()])
        .await
        .unwrap();
    let granted = Privilege::new("server1", "SELECT")
        .with_db("db1")
        .with_table("table1");
    client
        .alter_role_grant_privilege("test-admin", "viewer", granted.clone())
        .await
        .unwrap();

    let privileges = client
        .list_privileges_by_user("test-admin", &scope, "test-user")
        .await
        .unwrap();
    assert_eq!(privileges, vec![granted]);

    // A disjoint scope filters it back out.
    let other = AuthorizableScope::server("server1").with_db("db2");
    let privileges = client
        .list_privileges_by_user("test-admin", &other, "test-user")
        .await
        .unwrap();
    assert!(privileges.is_empty());
}

#[tokio::test]
async fn test_alter_role_add_groups() {
    let warden = seeded();
    let client = client_for(&warden);
    client.start().await.unwrap();

    let groups = vec!["user".to_string()];

    // Non-admin requestor is rejected before any existence check.
    let err = client
        .alter_role_add_groups("joe-interloper", "viewer", &groups)
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    // An admin altering a missing role sees not-found, not a permission
    // error.
    let err = client
        .alter_role_add_groups("test-admin", "viewer", &groups)
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::NotFound(_)), "{err}");

    client.create_role("test-admin", "viewer").await.unwrap();
    client
        .alter_role_add_groups("test-admin", "viewer", &groups)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_alter_role_grant_privilege() {
    let warden = seeded();
    let client = client_for(&warden);
    client.start().await.unwrap();

    let privilege = Privilege::new("server", "SELECT")
        .with_db("db")
        .with_table("table");

    client.create_role("test-admin", "viewer").await.unwrap();

    let err = client
        .alter_role_grant_privilege("joe-interloper", "viewer", privilege.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::PermissionDenied(_)), "{err}");

    let err = client
        .alter_role_grant_privilege("test-admin", "not-exist", privilege.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, WardenError::NotFound(_)), "{err}");

    client
        .alter_role_grant_privilege("test-admin", "viewer", privilege)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_operations_require_ready_transport() {
    let warden = seeded();
    let client = client_for(&warden);

    // Not started yet.
    assert_eq!(client.state(), ConnectionState::Unconnected);
    let err = client.create_role("test-admin", "viewer").await.unwrap_err();
    assert!(matches!(err, WardenError::NotConnected), "{err}");

    client.start().await.unwrap();
    assert_eq!(client.state(), ConnectionState::Ready);
    client.create_role("test-admin", "viewer").await.unwrap();

    // Stopped again; stop is idempotent.
    client.stop();
    client.stop();
    assert_eq!(client.state(), ConnectionState::Unconnected);
    let err = client.drop_role("test-admin", "viewer").await.unwrap_err();
    assert!(matches!(err, WardenError::NotConnected), "{err}");
}

#[tokio::test]
async fn test_connect_failure_against_stopped_server() {
    let warden = seeded();
    warden.stop();
    let client = client_for(&warden);

    let err = client.start().await.unwrap_err();
    assert!(matches!(err, WardenError::Connect(_)), "{err}");
    assert_eq!(client.state(), ConnectionState::Failed);
}

#[tokio::test]
async fn test_restart_invalidates_old_transport() {
    let warden = seeded();
    let client = client_for(&warden);
    client.start().await.unwrap();

    warden.stop();
    let err = client.create_role("test-admin", "viewer").await.unwrap_err();
    assert!(err.is_connectivity(), "{err}");

    // The server came back, but this transport belongs to the previous
    // incarnation and stays dead until the client reconnects.
    warden.start();
    let err = client.create_role("test-admin", "viewer").await.unwrap_err();
    assert!(err.is_connectivity(), "{err}");

    client.stop();
    client.start().await.unwrap();
    client.create_role("test-admin", "viewer").await.unwrap();
}

#[tokio::test]
async fn test_handshake_authenticates_the_channel() {
    let warden = seeded();
    warden.enable_authentication("warden", "hunter2");

    // Matching credential and principal.
    let client = WardenClient::new(
        warden.address().clone(),
        ClientConfig::new().with_authentication("warden"),
        Arc::new(
            warden
                .connector()
                .with_credentials(StaticCredentials::new("hunter2")),
        ),
    );
    client.start().await.unwrap();
    client.create_role("test-admin", "viewer").await.unwrap();
}

#[tokio::test]
async fn test_handshake_rejects_bad_credentials() {
    let warden = seeded();
    warden.enable_authentication("warden", "hunter2");

    let client = WardenClient::new(
        warden.address().clone(),
        ClientConfig::new().with_authentication("warden"),
        Arc::new(
            warden
                .connector()
                .with_credentials(StaticCredentials::new("wrong")),
        ),
    );
    let err = client.start().await.unwrap_err();
    assert!(matches!(err, WardenError::AuthenticationFailed(_)), "{err}");
    assert_eq!(client.state(), ConnectionState::Failed);
}

#[tokio::test]
async fn test_handshake_rejects_principal_mismatch() {
    let warden = seeded();
    warden.enable_authentication("warden", "hunter2");

    let client = WardenClient::new(
        warden.address().clone(),
        ClientConfig::new().with_authentication("someone-else"),
        Arc::new(
            warden
                .connector()
                .with_credentials(StaticCredentials::new("hunter2")),
        ),
    );
    let err = client.start().await.unwrap_err();
    assert!(matches!(err, WardenError::AuthenticationFailed(_)), "{err}");
}

#[tokio::test]
async fn test_unauthenticated_client_rejected_by_secured_server() {
    let warden = seeded();
    warden.enable_authentication("warden", "hunter2");

    let client = client_for(&warden);
    let err = client.start().await.unwrap_err();
    assert!(matches!(err, WardenError::AuthenticationFailed(_)), "{err}");
}
