//! Error types for Warden client operations.

use std::fmt;

/// Errors that can occur when talking to the Warden authorization service.
///
/// The enum is closed on purpose: every structured error code the remote
/// service can report has a defined variant here, and unrecognized codes map
/// to [`WardenError::Internal`] instead of growing the taxonomy.
///
/// Two families matter for callers:
/// - *connectivity errors* ([`is_connectivity`](Self::is_connectivity)) —
///   transport faults after a connection was established; the HA wrapper
///   handles these by failing over and they only surface once the retry
///   budget is exhausted, wrapped in [`WardenError::Unavailable`].
/// - *application errors* ([`is_application`](Self::is_application)) —
///   semantic rejections from the service; these are final and are never
///   retried.
#[derive(Debug)]
pub enum WardenError {
    /// Failed to establish a connection to a server.
    Connect(String),
    /// The security handshake failed: bad or expired credentials, or the
    /// server did not present the expected service principal.
    AuthenticationFailed(String),
    /// A transport fault after the connection was established (socket reset,
    /// timeout, aborted call). Triggers failover in the HA wrapper.
    Connectivity(String),
    /// The entity to create already exists (duplicate role).
    AlreadyExists(String),
    /// The role or entity is absent.
    NotFound(String),
    /// The requestor lacks admin or ownership rights, or has no resolvable
    /// group mapping.
    PermissionDenied(String),
    /// The service rejected the request as malformed.
    InvalidArgument(String),
    /// An unrecognized error from the service. Logged with full detail at
    /// the mapping site; terminal for the caller.
    Internal(String),
    /// The failover budget was exhausted without completing the operation.
    Unavailable {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// The last underlying connect or connectivity error.
        source: Box<WardenError>,
    },
    /// An operation was invoked without an active transport.
    NotConnected,
    /// Invalid client configuration.
    InvalidConfig(String),
}

impl WardenError {
    /// Whether this error is a transport fault the HA wrapper may retry
    /// against another candidate.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, WardenError::Connectivity(_))
    }

    /// Whether this error is a semantic rejection from the service.
    /// Application errors are final: retrying would not change an
    /// authorization decision.
    pub fn is_application(&self) -> bool {
        matches!(
            self,
            WardenError::AlreadyExists(_)
                | WardenError::NotFound(_)
                | WardenError::PermissionDenied(_)
                | WardenError::InvalidArgument(_)
        )
    }
}

impl fmt::Display for WardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WardenError::Connect(msg) => write!(f, "connection failed: {msg}"),
            WardenError::AuthenticationFailed(msg) => {
                write!(f, "authentication failed: {msg}")
            }
            WardenError::Connectivity(msg) => write!(f, "connection fault: {msg}"),
            WardenError::AlreadyExists(msg) => write!(f, "already exists: {msg}"),
            WardenError::NotFound(msg) => write!(f, "not found: {msg}"),
            WardenError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            WardenError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            WardenError::Internal(msg) => write!(f, "internal service error: {msg}"),
            WardenError::Unavailable { attempts, source } => {
                write!(f, "service unavailable after {attempts} attempts: {source}")
            }
            WardenError::NotConnected => write!(f, "client is not connected"),
            WardenError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for WardenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WardenError::Unavailable { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<tonic::transport::Error> for WardenError {
    fn from(err: tonic::transport::Error) -> Self {
        WardenError::Connect(err.to_string())
    }
}

/// The exhaustive mapping from the service's structured error codes to the
/// uniform taxonomy. Total over [`tonic::Code`]: unknown codes become
/// [`WardenError::Internal`] rather than panicking.
impl From<tonic::Status> for WardenError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            tonic::Code::AlreadyExists => WardenError::AlreadyExists(message),
            tonic::Code::NotFound => WardenError::NotFound(message),
            tonic::Code::PermissionDenied => WardenError::PermissionDenied(message),
            tonic::Code::InvalidArgument => WardenError::InvalidArgument(message),
            tonic::Code::Unauthenticated => WardenError::AuthenticationFailed(message),
            tonic::Code::Unavailable
            | tonic::Code::DeadlineExceeded
            | tonic::Code::Aborted
            | tonic::Code::Cancelled => {
                WardenError::Connectivity(format!("{:?}: {message}", status.code()))
            }
            code => {
                tracing::warn!(
                    code = ?code,
                    message = %message,
                    "unrecognized status from authorization service"
                );
                WardenError::Internal(format!("{code:?}: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::{Code, Status};

    #[test]
    fn test_application_codes_map_to_their_variants() {
        assert!(matches!(
            WardenError::from(Status::new(Code::AlreadyExists, "dup")),
            WardenError::AlreadyExists(_)
        ));
        assert!(matches!(
            WardenError::from(Status::new(Code::NotFound, "absent")),
            WardenError::NotFound(_)
        ));
        assert!(matches!(
            WardenError::from(Status::new(Code::PermissionDenied, "nope")),
            WardenError::PermissionDenied(_)
        ));
        assert!(matches!(
            WardenError::from(Status::new(Code::InvalidArgument, "bad")),
            WardenError::InvalidArgument(_)
        ));
        assert!(matches!(
            WardenError::from(Status::new(Code::Unauthenticated, "who")),
            WardenError::AuthenticationFailed(_)
        ));
    }

    #[test]
    fn test_transport_fault_codes_map_to_connectivity() {
        for code in [
            Code::Unavailable,
            Code::DeadlineExceeded,
            Code::Aborted,
            Code::Cancelled,
        ] {
            let err = WardenError::from(Status::new(code, "gone"));
            assert!(err.is_connectivity(), "{code:?} should be a connectivity error");
        }
    }

    #[test]
    fn test_mapping_is_total_over_all_codes() {
        // Codes with no dedicated variant must land on Internal, never panic.
        for code in [
            Code::Ok,
            Code::Unknown,
            Code::FailedPrecondition,
            Code::ResourceExhausted,
            Code::OutOfRange,
            Code::Unimplemented,
            Code::Internal,
            Code::DataLoss,
        ] {
            let err = WardenError::from(Status::new(code, "odd"));
            assert!(
                matches!(err, WardenError::Internal(_)),
                "{code:?} should map to Internal, got {err}"
            );
        }
    }

    #[test]
    fn test_error_families_are_disjoint() {
        let conn = WardenError::Connectivity("reset".into());
        let app = WardenError::PermissionDenied("nope".into());
        assert!(conn.is_connectivity() && !conn.is_application());
        assert!(app.is_application() && !app.is_connectivity());
        assert!(!WardenError::NotConnected.is_connectivity());
        assert!(!WardenError::Connect("refused".into()).is_application());
    }

    #[test]
    fn test_unavailable_carries_last_error_as_source() {
        let err = WardenError::Unavailable {
            attempts: 3,
            source: Box::new(WardenError::Connect("refused".into())),
        };
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("refused"));
        assert!(err.to_string().contains("after 3 attempts"));
    }
}
