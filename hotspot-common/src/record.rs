use crate::Status;
use serde::{Deserialize, Serialize};

/// Server-side identifier of a detection record.
pub type RecordId = i64;

/// A detection record as supplied by the selection provider.
///
/// Image paths are relative to the server; see [`crate::resolve_image_url`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    pub record_id: RecordId,
    pub lat: f64,
    pub lng: f64,
    pub date: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub rgb_image_url: Option<String>,
    #[serde(default)]
    pub ir_image_url: Option<String>,
    #[serde(default)]
    pub masked_image_url: Option<String>,
    /// Whether the detector flagged this record. Only flagged records have a
    /// meaningful detection overlay.
    #[serde(default)]
    pub is_hotspot: bool,
}
