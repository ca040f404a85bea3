use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a hotspot record.
///
/// Serialized with the variant name (`"NotViewed"`), which is what the server
/// stores and what the update endpoint expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Undefined,
    NotViewed,
    Viewed,
    Dismissed,
    Visited,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0:?}")]
pub struct ParseStatusError(pub String);

impl Status {
    /// Every status in selector order.
    pub const ALL: [Status; 5] = [
        Status::Undefined,
        Status::NotViewed,
        Status::Viewed,
        Status::Dismissed,
        Status::Visited,
    ];

    /// Statuses an operator can actually assign. `Undefined` only appears as
    /// the selector placeholder.
    pub fn selectable() -> &'static [Status] {
        &Self::ALL[1..]
    }

    /// Name sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Undefined => "Undefined",
            Status::NotViewed => "NotViewed",
            Status::Viewed => "Viewed",
            Status::Dismissed => "Dismissed",
            Status::Visited => "Visited",
        }
    }

    /// Human-readable label shown in the panel.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Undefined => "Undefined",
            Status::NotViewed => "Not Viewed",
            Status::Viewed => "Viewed",
            Status::Dismissed => "Dismissed",
            Status::Visited => "Visited",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts wire names and labels, ignoring case, spaces, `-` and `_`.
impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Status::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == key)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
