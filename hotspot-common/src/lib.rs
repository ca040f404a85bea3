//! hotspot-common - Pure types shared by the panel core and its front ends
//!
//! Nothing in here performs I/O: records, statuses, the metadata projection
//! and the overlay toggle are plain data plus deterministic functions.

mod overlay;
mod record;
mod snapshot;
mod status;

pub use overlay::*;
pub use record::*;
pub use snapshot::*;
pub use status::*;
