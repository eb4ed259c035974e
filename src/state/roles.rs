//! Role model: a closed enumeration with a fixed precedence order.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Marketplace roles, highest precedence first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    PrinterOwner,
    #[default]
    User,
}

/// Precedence walk order used by [`highest_role`].
pub const ROLE_PRECEDENCE: [Role; 3] = [Role::Admin, Role::PrinterOwner, Role::User];

impl Role {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::PrinterOwner => "printer_owner",
            Role::User => "user",
        }
    }

    /// Parse a role name, folding legacy spellings like `printer-owner`
    /// into the canonical form. Unknown names fall back to `User`.
    pub fn parse(name: &str) -> Role {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "printer_owner" | "printer-owner" => Role::PrinterOwner,
            _ => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Role::parse(&name))
    }
}

/// First role of the precedence list present in `roles`, defaulting to
/// `User` when nothing matches (including the empty set).
pub fn highest_role(roles: &[Role]) -> Role {
    for role in ROLE_PRECEDENCE {
        if roles.contains(&role) {
            return role;
        }
    }
    Role::User
}
