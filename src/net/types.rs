//! Wire types shared between the REST layer and session state.
//!
//! The backend is loosely typed: role fields arrive as an array, a single
//! string, or not at all, and legacy spellings like `printer-owner` still
//! circulate in stored records. Everything is normalized here, at the
//! deserialization boundary, so nothing past this module sees a raw shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::state::roles::Role;

/// Authenticated principal as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub credits: f64,
    #[serde(default = "default_roles", deserialize_with = "roles_field")]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub university: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

fn default_roles() -> Vec<Role> {
    vec![Role::User]
}

/// Accept `"user"`, `["user", "printer-owner"]`, or a missing field.
/// Duplicates collapse and an empty result falls back to `["user"]`, so the
/// role set is never empty.
fn roles_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Role>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRoles {
        One(String),
        Many(Vec<String>),
    }

    let names = match Option::<RawRoles>::deserialize(deserializer)? {
        None => return Ok(default_roles()),
        Some(RawRoles::One(name)) => vec![name],
        Some(RawRoles::Many(names)) => names,
    };

    let mut roles = Vec::new();
    for name in &names {
        let role = Role::parse(name);
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        roles = default_roles();
    }
    Ok(roles)
}

impl User {
    /// Apply a local-only patch. `None` fields are left untouched.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(profile_picture) = patch.profile_picture {
            self.profile_picture = Some(profile_picture);
        }
        if let Some(credits) = patch.credits {
            self.credits = credits;
        }
        if let Some(university) = patch.university {
            self.university = university;
        }
        if let Some(hall) = patch.hall {
            self.hall = Some(hall);
        }
    }
}

/// Partial user update for fields the backend does not separately confirm.
#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub credits: Option<f64>,
    pub university: Option<String>,
    pub hall: Option<String>,
}

/// Successful login/register payload: `{ user, token }`.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Avatar upload payload: `{ message, url, user }`, each best-effort.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Registration payload for `POST /api/auth/register`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub university: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
}

/// Partial profile update for `PUT /api/users/me`. Only the provided
/// fields are sent.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}
