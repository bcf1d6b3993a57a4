//! Station descriptor.

use super::StationId;

/// A station in the network.
///
/// A `Station` is well formed if its `id` is unique across all stations in
/// the network; uniqueness is enforced when the station is added.
///
/// Two stations are equal if they have the same id.
#[derive(Debug, Clone)]
pub struct Station {
    /// Unique station id.
    pub id: StationId,

    /// Human-readable station name.
    pub name: String,
}

impl Station {
    /// Create a new station descriptor.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}
