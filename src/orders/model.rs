use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Nanoseconds since the Unix epoch, as the backend stamps orders.
pub type Time = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque caller identity issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    Repair,
    Cleaning,
    ConsumableReplacement,
    Other(String),
}

impl ServiceType {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Repair => "Repair",
            Self::Cleaning => "Cleaning",
            Self::ConsumableReplacement => "Consumable Replacement",
            Self::Other(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub service_type: ServiceType,
    pub owner: Principal,
    pub timestamp: Time,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }
}

/// `Feb 12, 2026, 10:00 AM`, in UTC.
#[must_use]
pub fn format_timestamp(timestamp: Time) -> String {
    DateTime::from_timestamp_nanos(timestamp)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}
