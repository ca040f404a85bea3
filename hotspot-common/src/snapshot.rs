use crate::{HotspotRecord, Status};

/// Display-ready projection of the selected record.
///
/// Always produced whole by [`project`]; the only field ever changed in place
/// is `status`, after the server has accepted an update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataSnapshot {
    /// `"{lat}°, {lng}°"` with four decimals, empty when nothing is selected
    pub location: String,
    pub date: String,
    pub status: Status,
    pub rgb_image: Option<String>,
    pub masked_image: Option<String>,
    pub ir_image: Option<String>,
}

impl MetadataSnapshot {
    /// The snapshot shown when no record is selected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Copy of this snapshot with only the status replaced.
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Project the current selection into a snapshot.
///
/// `server` is the base URL image paths are resolved against.
pub fn project(selection: Option<&HotspotRecord>, server: &str) -> MetadataSnapshot {
    let Some(record) = selection else {
        return MetadataSnapshot::empty();
    };

    let resolve = |path: &Option<String>| {
        path.as_deref()
            .and_then(|path| resolve_image_url(server, path))
    };

    MetadataSnapshot {
        location: format_location(record.lat, record.lng),
        date: record.date.clone(),
        status: record.status,
        rgb_image: resolve(&record.rgb_image_url),
        masked_image: resolve(&record.masked_image_url),
        ir_image: resolve(&record.ir_image_url),
    }
}

pub fn format_location(lat: f64, lng: f64) -> String {
    format!("{}°, {}°", to_fixed4(lat), to_fixed4(lng))
}

/// Four-decimal rendering that settles exact ties away from zero.
///
/// `{:.4}` rounds a tie to the even digit, so `1.03125` would become
/// `1.0312` where the detection web client shows `1.0313`.
fn to_fixed4(value: f64) -> String {
    // Negative zero prints without a sign.
    let value = if value == 0.0 { 0.0 } else { value };
    let formatted = format!("{:.4}", value);
    let magnitude = value.abs();

    // An exact tie ends in a 5 at the fifth decimal, which needs a binary
    // expansion no finer than 1/32.
    if !magnitude.is_finite() || (magnitude * 32.0).fract() != 0.0 {
        return formatted;
    }
    let exact = format!("{:.5}", magnitude);
    let Some(truncated) = exact.strip_suffix('5') else {
        return formatted;
    };

    let rounded = increment_last_digit(truncated);
    if value.is_sign_negative() {
        format!("-{rounded}")
    } else {
        rounded
    }
}

/// Add one unit in the last place of a non-negative decimal string.
fn increment_last_digit(decimal: &str) -> String {
    let mut digits: Vec<u8> = decimal.bytes().collect();
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => continue,
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                return String::from_utf8_lossy(&digits).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&digits))
}

/// Join a server base and a record-relative image path with a single `/`.
///
/// Returns `None` for an empty path.
pub fn resolve_image_url(server: &str, path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", server.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "http://detector.local:8000";

    fn record(record_id: i64, lat: f64, lng: f64) -> HotspotRecord {
        HotspotRecord {
            record_id,
            lat,
            lng,
            date: "2024-01-01".to_string(),
            status: Status::NotViewed,
            rgb_image_url: Some("/media/rgb.jpg".to_string()),
            ir_image_url: Some("/media/ir.jpg".to_string()),
            masked_image_url: Some("/media/masked.jpg".to_string()),
            is_hotspot: true,
        }
    }

    #[test]
    fn test_location_rounds_to_four_places() {
        assert_eq!(format_location(12.34567, -98.7), "12.3457°, -98.7000°");
        assert_eq!(format_location(1.23456, 2.34567), "1.2346°, 2.3457°");
        assert_eq!(format_location(0.0, 0.0), "0.0000°, 0.0000°");
    }

    #[test]
    fn test_location_ties_round_away_from_zero() {
        assert_eq!(format_location(1.03125, 0.15625), "1.0313°, 0.1563°");
        assert_eq!(format_location(-1.03125, -0.15625), "-1.0313°, -0.1563°");
        assert_eq!(format_location(45.96875, -122.09375), "45.9688°, -122.0938°");
        assert_eq!(format_location(0.03125, 0.0), "0.0313°, 0.0000°");
    }

    #[test]
    fn test_location_non_ties_unchanged() {
        assert_eq!(format_location(1.5, -2.25), "1.5000°, -2.2500°");
        assert_eq!(format_location(-0.0, 90.0), "0.0000°, 90.0000°");
        assert_eq!(format_location(-0.00001, 12.34567), "-0.0000°, 12.3457°");
    }

    #[test]
    fn test_increment_last_digit_carries() {
        assert_eq!(increment_last_digit("1.0312"), "1.0313");
        assert_eq!(increment_last_digit("0.9999"), "1.0000");
        assert_eq!(increment_last_digit("99.9999"), "100.0000");
    }

    #[test]
    fn test_project_none_is_empty() {
        let snapshot = project(None, SERVER);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.location, "");
        assert_eq!(snapshot.date, "");
        assert_eq!(snapshot.status, Status::Undefined);
        assert!(snapshot.rgb_image.is_none());
        assert!(snapshot.masked_image.is_none());
        assert!(snapshot.ir_image.is_none());
    }

    #[test]
    fn test_project_record() {
        let snapshot = project(Some(&record(7, 12.34567, -98.7)), SERVER);
        assert_eq!(snapshot.location, "12.3457°, -98.7000°");
        assert_eq!(snapshot.date, "2024-01-01");
        assert_eq!(snapshot.status, Status::NotViewed);
        assert_eq!(
            snapshot.rgb_image.as_deref(),
            Some("http://detector.local:8000/media/rgb.jpg")
        );
        assert_eq!(
            snapshot.masked_image.as_deref(),
            Some("http://detector.local:8000/media/masked.jpg")
        );
        assert_eq!(
            snapshot.ir_image.as_deref(),
            Some("http://detector.local:8000/media/ir.jpg")
        );
    }

    #[test]
    fn test_project_missing_assets_stay_none() {
        let mut r = record(3, 1.0, 2.0);
        r.ir_image_url = None;
        r.masked_image_url = Some(String::new());
        let snapshot = project(Some(&r), SERVER);
        assert!(snapshot.rgb_image.is_some());
        assert!(snapshot.masked_image.is_none());
        assert!(snapshot.ir_image.is_none());
    }

    #[test]
    fn test_project_is_deterministic() {
        let r = record(5, 45.5, 9.25);
        assert_eq!(project(Some(&r), SERVER), project(Some(&r), SERVER));
    }

    #[test]
    fn test_resolve_image_url_normalizes_slashes() {
        assert_eq!(
            resolve_image_url("http://host/", "/a/b.jpg").as_deref(),
            Some("http://host/a/b.jpg")
        );
        assert_eq!(
            resolve_image_url("http://host", "a/b.jpg").as_deref(),
            Some("http://host/a/b.jpg")
        );
        assert_eq!(resolve_image_url("http://host", ""), None);
        assert_eq!(resolve_image_url("http://host", "/"), None);
    }

    #[test]
    fn test_with_status_keeps_other_fields() {
        let snapshot = project(Some(&record(1, 1.0, 1.0)), SERVER);
        let updated = snapshot.with_status(Status::Dismissed);
        assert_eq!(updated.status, Status::Dismissed);
        assert_eq!(updated.location, snapshot.location);
        assert_eq!(updated.rgb_image, snapshot.rgb_image);
    }
}
