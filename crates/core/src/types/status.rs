//! Status enums for catalog entities and accounts.
//!
//! The backend encodes both as small integers, sometimes serialized as JSON
//! numbers and sometimes as numeric strings. Both forms are accepted here so
//! nothing downstream has to compare raw values.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw status code as it appears on the wire.
///
/// `Other` swallows anything else (`null`, booleans, objects) so an odd
/// status never fails the surrounding payload.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireCode {
    Number(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl WireCode {
    #[allow(clippy::cast_possible_truncation)]
    fn as_code(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract().abs() < f64::EPSILON => Some(*f as i64),
            Self::Float(_) | Self::Other(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Product availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    /// Listed and sellable (wire code `1`).
    #[default]
    Active,
    /// Hidden from sale (any other wire code).
    Inactive,
}

impl ProductStatus {
    /// Wire code for active products.
    pub const ACTIVE_CODE: i64 = 1;
    /// Wire code used when submitting an inactive product.
    pub const INACTIVE_CODE: i64 = 0;

    /// Map a wire code to a status.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        if code == Self::ACTIVE_CODE {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Wire code for this status.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Active => Self::ACTIVE_CODE,
            Self::Inactive => Self::INACTIVE_CODE,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => other
                .parse::<i64>()
                .map(Self::from_code)
                .map_err(|_| format!("invalid product status: {s}")),
        }
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = WireCode::deserialize(deserializer)?;
        Ok(raw.as_code().map_or(Self::Inactive, Self::from_code))
    }
}

/// Coarse account role, used only to pick which view to show.
///
/// This is not a security boundary; the backend enforces authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular shopper (any status other than the admin code).
    #[default]
    User,
    /// Catalog administrator (status code `2`).
    Admin,
}

impl Role {
    /// Status code the backend reports for administrators.
    pub const ADMIN_CODE: i64 = 2;
    /// Status code written when caching a non-admin role.
    pub const USER_CODE: i64 = 1;

    /// Map an account status code to a role.
    #[must_use]
    pub const fn from_status_code(code: i64) -> Self {
        if code == Self::ADMIN_CODE {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// Canonical status code for this role.
    #[must_use]
    pub const fn status_code(&self) -> i64 {
        match self {
            Self::Admin => Self::ADMIN_CODE,
            Self::User => Self::USER_CODE,
        }
    }

    /// Whether this role may manage the catalog.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Parse a cached status code (e.g. `"2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self::from_status_code)
            .map_err(|_| format!("invalid role status code: {s}"))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.status_code())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = WireCode::deserialize(deserializer)?;
        Ok(raw.as_code().map_or(Self::User, Self::from_status_code))
    }
}
