use serde::{Deserialize, Serialize};

/// Unique identifier for a reservation.
///
/// Wraps the stored order-id string to provide type safety and prevent
/// mixing up order identifiers with other string-based values. The
/// encoding of the string is owned by the allocation strategy; this type
/// only carries it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an order ID from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier for a catalog work.
///
/// Catalog rows use positive integers; zero and negative values occur only
/// as sentinel results from aggregate queries and are rejected by the
/// booking workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(i32);

impl WorkId {
    /// Creates a work ID from a raw integer.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying integer.
    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns true if this is a valid catalog identifier.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for WorkId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<WorkId> for i32 {
    fn from(id: WorkId) -> Self {
        id.0
    }
}
