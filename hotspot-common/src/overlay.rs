use crate::MetadataSnapshot;

pub const SHOW_OVERLAY_LABEL: &str = "Show Detection Overlay";
pub const SHOW_RAW_LABEL: &str = "Show raw RGB";

/// Which RGB variant the panel shows: the raw photo or the annotated one.
///
/// Purely local display state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayToggle {
    show_masked: bool,
}

impl OverlayToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.show_masked = !self.show_masked;
    }

    pub fn reset(&mut self) {
        self.show_masked = false;
    }

    pub fn is_showing_overlay(&self) -> bool {
        self.show_masked
    }

    /// Button text, naming the state a click switches to.
    pub fn label(&self) -> &'static str {
        if self.show_masked {
            SHOW_RAW_LABEL
        } else {
            SHOW_OVERLAY_LABEL
        }
    }

    /// RGB image to display for `snapshot`.
    ///
    /// Nothing is shown unless both variants exist.
    pub fn visible_image<'a>(&self, snapshot: &'a MetadataSnapshot) -> Option<&'a str> {
        match (&snapshot.rgb_image, &snapshot.masked_image) {
            (Some(_), Some(masked)) if self.show_masked => Some(masked.as_str()),
            (Some(raw), Some(_)) => Some(raw.as_str()),
            _ => None,
        }
    }
}
