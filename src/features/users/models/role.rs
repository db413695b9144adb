use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::constants::{ROLE_ADMIN, ROLE_USER};

/// Coarse permission tier.
///
/// Backends disagree on the wire shape (`0`/`1`, `"0"`/`"1"`, `"user"`/`"admin"`,
/// `"Admin"`), so deserialization accepts all of them and collapses anything
/// unrecognised to [`Role::User`]. Serialization always emits the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case(ROLE_ADMIN) || name == "1" {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

struct RoleVisitor;

impl<'de> Visitor<'de> for RoleVisitor {
    type Value = Role;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a role code (0/1) or name (\"user\"/\"admin\")")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Role, E> {
        Ok(Role::from_code(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Role, E> {
        Ok(if v == 1 { Role::Admin } else { Role::User })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Role, E> {
        Ok(Role::from_name(v))
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RoleVisitor)
    }
}
