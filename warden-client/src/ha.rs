//! High-availability wrapper over [`WardenClient`].
//!
//! Holds an ordered set of candidate replicas and at most one live client.
//! `execute` transparently reconnects and retries across server restarts and
//! pauses; application-level rejections are returned immediately, because
//! retrying would not change an authorization decision.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::address::ServerAddress;
use crate::client::WardenClient;
use crate::config::{ClientConfig, RetryPolicy};
use crate::error::WardenError;
use crate::transport::{Connector, GrpcConnector};

struct HaState {
    candidates: Vec<ServerAddress>,
    config: ClientConfig,
    client: Option<Arc<WardenClient>>,
    /// Index of the candidate the active client is (or was last) bound to.
    /// Connect sweeps start here so a known-bad replica is not hammered
    /// first after a failover.
    cursor: usize,
    started: bool,
}

/// High-availability client: candidate set, failover, bounded retry.
///
/// Connection policy is lazy: `start` only records the candidates and
/// config; the first `execute` opens the connection. `execute` calls are
/// fully serialized on an internal async mutex — the connection-state
/// transition and the remote call both run inside it, so two callers racing
/// to reconnect collapse into a single connection attempt and at most one
/// client is ever active.
///
/// # Example
///
/// ```ignore
/// use warden_client::{ClientConfig, HaClient, ServerAddress};
///
/// let ha = HaClient::new();
/// ha.start(vec![ServerAddress::new("warden-1", 8038),
///               ServerAddress::new("warden-2", 8038)],
///          ClientConfig::new()).await?;
///
/// ha.execute(|client| async move {
///     client.create_role("admin", "analyst").await?;
///     client.alter_role_add_groups("admin", "analyst", &groups).await
/// })
/// .await?;
/// ```
pub struct HaClient {
    connector: Arc<dyn Connector>,
    inner: Mutex<HaState>,
}

impl HaClient {
    /// HA client over the production gRPC connector.
    pub fn new() -> Self {
        Self::with_connector(Arc::new(GrpcConnector::new()))
    }

    /// HA client over a custom connector (used by the in-process test
    /// double).
    pub fn with_connector(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            inner: Mutex::new(HaState {
                candidates: Vec::new(),
                config: ClientConfig::new(),
                client: None,
                cursor: 0,
                started: false,
            }),
        }
    }

    /// Record the candidate set and configuration. Does not connect; the
    /// first `execute` does. Calling `start` again replaces the candidate
    /// set and closes any active connection.
    pub async fn start(
        &self,
        candidates: Vec<ServerAddress>,
        config: ClientConfig,
    ) -> Result<(), WardenError> {
        config.validate()?;
        if candidates.is_empty() {
            return Err(WardenError::InvalidConfig(
                "candidate set must not be empty".into(),
            ));
        }
        let mut state = self.inner.lock().await;
        if let Some(client) = state.client.take() {
            client.stop();
        }
        state.candidates = candidates;
        state.config = config;
        state.cursor = 0;
        state.started = true;
        Ok(())
    }

    /// Run `op` against the active client, reconnecting and retrying on
    /// connectivity faults.
    ///
    /// One attempt = one connect sweep over the candidates (when no client
    /// is active) plus one invocation of `op`. Up to `max_retries` attempts
    /// are made, `retry_backoff` apart; exhaustion yields
    /// [`WardenError::Unavailable`] carrying the last underlying error.
    /// `op` may be invoked several times, each time with the then-active
    /// client, so it must be safe to re-run on connectivity failure.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, WardenError>
    where
        F: FnMut(Arc<WardenClient>) -> Fut,
        Fut: Future<Output = Result<T, WardenError>>,
    {
        let mut state = self.inner.lock().await;
        if !state.started {
            return Err(WardenError::NotConnected);
        }
        let attempts = state.config.max_retries.max(1);
        let backoff = state.config.retry_backoff();
        let mut last_err: Option<WardenError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(backoff).await;
            }

            let client = match state.client.as_ref() {
                Some(client) => Arc::clone(client),
                None => match Self::connect_any(&mut state, &self.connector).await {
                    Ok(client) => client,
                    Err(err) => {
                        debug!(attempt = attempt + 1, error = %err, "no candidate reachable");
                        last_err = Some(err);
                        continue;
                    }
                },
            };

            match op(Arc::clone(&client)).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_connectivity() => {
                    warn!(
                        server = %client.address(),
                        attempt = attempt + 1,
                        error = %err,
                        "connection lost, failing over"
                    );
                    client.stop();
                    state.client = None;
                    if state.config.retry_policy == RetryPolicy::AdvanceThenRetry {
                        state.cursor = (state.cursor + 1) % state.candidates.len();
                    }
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        let source = Box::new(last_err.unwrap_or_else(|| {
            WardenError::Connect("no connection attempt recorded".into())
        }));
        Err(WardenError::Unavailable { attempts, source })
    }

    /// Close the active connection, if any. Idempotent; the wrapper stays
    /// usable and the next `execute` reconnects.
    pub async fn stop(&self) {
        let mut state = self.inner.lock().await;
        if let Some(client) = state.client.take() {
            client.stop();
        }
    }

    /// One sweep over the candidates starting at the cursor. The first
    /// replica that accepts a connection becomes the active client and the
    /// new cursor position; if none does, the last error is reported.
    async fn connect_any(
        state: &mut HaState,
        connector: &Arc<dyn Connector>,
    ) -> Result<Arc<WardenClient>, WardenError> {
        let count = state.candidates.len();
        let mut last_err: Option<WardenError> = None;
        for step in 0..count {
            let index = (state.cursor + step) % count;
            let address = state.candidates[index].clone();
            let client = WardenClient::new(
                address.clone(),
                state.config.clone(),
                Arc::clone(connector),
            );
            match client.start().await {
                Ok(()) => {
                    debug!(server = %address, "connected to authorization service");
                    let client = Arc::new(client);
                    state.cursor = index;
                    state.client = Some(Arc::clone(&client));
                    return Ok(client);
                }
                Err(err) => {
                    debug!(server = %address, error = %err, "candidate rejected connection");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| WardenError::InvalidConfig("candidate set must not be empty".into())))
    }
}

impl Default for HaClient {
    fn default() -> Self {
        Self::new()
    }
}
