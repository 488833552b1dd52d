//! In-memory role/group/privilege store backing [`MiniWarden`].
//!
//! Implements just enough of the service's semantics to exercise every
//! error kind a real deployment can report: admin enforcement, group
//! resolution, duplicate and missing roles, malformed requests.
//!
//! [`MiniWarden`]: crate::MiniWarden

use std::collections::{HashMap, HashSet};

use tonic::Status;
use warden_client::{AuthorizableScope, Privilege};

#[derive(Default)]
pub(crate) struct PolicyStore {
    admins: HashSet<String>,
    groups_by_user: HashMap<String, HashSet<String>>,
    roles: HashMap<String, RoleEntry>,
}

#[derive(Default)]
struct RoleEntry {
    groups: HashSet<String>,
    privileges: Vec<Privilege>,
}

impl PolicyStore {
    /// Register `user` as a service administrator (also maps it into the
    /// `admin` group so it resolves).
    pub(crate) fn add_admin(&mut self, user: &str) {
        self.admins.insert(user.to_string());
        self.add_group_mapping(user, "admin");
    }

    pub(crate) fn add_group_mapping(&mut self, user: &str, group: &str) {
        self.groups_by_user
            .entry(user.to_string())
            .or_default()
            .insert(group.to_string());
    }

    pub(crate) fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    pub(crate) fn create_role(&mut self, requestor: &str, role: &str) -> Result<(), Status> {
        self.require_admin(requestor)?;
        require_name(role, "role name")?;
        if self.roles.contains_key(role) {
            return Err(Status::already_exists(format!(
                "role '{role}' already exists"
            )));
        }
        self.roles.insert(role.to_string(), RoleEntry::default());
        Ok(())
    }

    pub(crate) fn drop_role(&mut self, requestor: &str, role: &str) -> Result<(), Status> {
        self.require_admin(requestor)?;
        require_name(role, "role name")?;
        if self.roles.remove(role).is_none() {
            return Err(Status::not_found(format!("role '{role}' does not exist")));
        }
        Ok(())
    }

    pub(crate) fn add_groups(
        &mut self,
        requestor: &str,
        role: &str,
        groups: &[String],
    ) -> Result<(), Status> {
        self.require_admin(requestor)?;
        let entry = self
            .roles
            .get_mut(role)
            .ok_or_else(|| Status::not_found(format!("role '{role}' does not exist")))?;
        entry.groups.extend(groups.iter().cloned());
        Ok(())
    }

    pub(crate) fn grant_privilege(
        &mut self,
        requestor: &str,
        role: &str,
        privilege: Option<Privilege>,
    ) -> Result<(), Status> {
        self.require_admin(requestor)?;
        let entry = self
            .roles
            .get_mut(role)
            .ok_or_else(|| Status::not_found(format!("role '{role}' does not exist")))?;
        let privilege =
            privilege.ok_or_else(|| Status::invalid_argument("privilege is required"))?;
        entry.privileges.push(privilege);
        Ok(())
    }

    /// All privileges reachable from `principal`'s groups, filtered by
    /// `scope`. A principal with no grants yields an empty list.
    pub(crate) fn list_privileges_by_user(
        &self,
        requestor: &str,
        principal: &str,
        scope: Option<&AuthorizableScope>,
    ) -> Result<Vec<Privilege>, Status> {
        self.require_admin(requestor)?;
        require_name(principal, "principal")?;
        let groups = self.groups_by_user.get(principal).ok_or_else(|| {
            Status::permission_denied(format!(
                "unable to resolve groups for user '{principal}'"
            ))
        })?;

        let mut privileges = Vec::new();
        for entry in self.roles.values() {
            if entry.groups.is_disjoint(groups) {
                continue;
            }
            for privilege in &entry.privileges {
                let in_scope = scope.map(|s| privilege.matches(s)).unwrap_or(true);
                if in_scope {
                    privileges.push(privilege.clone());
                }
            }
        }
        Ok(privileges)
    }

    /// Admin enforcement runs before any existence check, so a non-admin
    /// requestor learns nothing about which roles exist.
    fn require_admin(&self, requestor: &str) -> Result<(), Status> {
        require_name(requestor, "requestor")?;
        if !self.groups_by_user.contains_key(requestor) {
            return Err(Status::permission_denied(format!(
                "unable to resolve groups for user '{requestor}'"
            )));
        }
        if !self.admins.contains(requestor) {
            return Err(Status::permission_denied(format!(
                "user '{requestor}' does not have administrative privileges"
            )));
        }
        Ok(())
    }
}

fn require_name(value: &str, what: &str) -> Result<(), Status> {
    if value.is_empty() {
        return Err(Status::invalid_argument(format!("{what} is required")));
    }
    Ok(())
}
