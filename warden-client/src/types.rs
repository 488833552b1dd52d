//! Domain types for privileges and resource scopes.
//!
//! These are the values callers construct and receive; the wire-level
//! equivalents live in [`crate::pb`] and conversions happen at the client
//! boundary.

use serde::{Deserialize, Serialize};

use crate::pb;

/// A resource scope: server, optionally narrowed to a database and a table.
///
/// Used as the filter for privilege listings. Empty fields match everything
/// at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizableScope {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub db: String,
    #[serde(default)]
    pub table: String,
}

impl AuthorizableScope {
    pub fn server(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.db = db.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

/// A permission tuple: a resource scope plus an action, attachable to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privilege {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub db: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub action: String,
}

impl Privilege {
    pub fn new(server: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.db = db.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Whether this privilege falls inside `scope`. Empty scope fields match
    /// everything at that level.
    pub fn matches(&self, scope: &AuthorizableScope) -> bool {
        (scope.server.is_empty() || scope.server == self.server)
            && (scope.db.is_empty() || scope.db == self.db)
            && (scope.table.is_empty() || scope.table == self.table)
    }
}

impl From<AuthorizableScope> for pb::AuthorizableScope {
    fn from(scope: AuthorizableScope) -> Self {
        Self {
            server: scope.server,
            db: scope.db,
            table: scope.table,
        }
    }
}

impl From<pb::AuthorizableScope> for AuthorizableScope {
    fn from(scope: pb::AuthorizableScope) -> Self {
        Self {
            server: scope.server,
            db: scope.db,
            table: scope.table,
        }
    }
}

impl From<Privilege> for pb::PrivilegeEntry {
    fn from(privilege: Privilege) -> Self {
        Self {
            server: privilege.server,
            db: privilege.db,
            table: privilege.table,
            action: privilege.action,
        }
    }
}

impl From<pb::PrivilegeEntry> for Privilege {
    fn from(entry: pb::PrivilegeEntry) -> Self {
        Self {
            server: entry.server,
            db: entry.db,
            table: entry.table,
            action: entry.action,
        }
    }
}
