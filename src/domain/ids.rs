//! Item identifier type
//!
//! Upstream items are addressed by a positive, monotonically assigned integer.
//! Progress is tracked purely in this id space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use itemsync::domain::ids::ItemId;
/// use std::str::FromStr;
///
/// let id = ItemId::from_str("8863").unwrap();
/// assert_eq!(id.value(), 8863);
/// assert_eq!(id.next(), ItemId::new(8864));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new ItemId
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id immediately after this one
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The id immediately before this one (saturates at zero)
    pub const fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid item id '{s}': {e}"))
    }
}
