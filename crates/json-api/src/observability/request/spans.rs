//! Route names for spans and metric labels.

use uuid::Uuid;

/// Replace UUID path segments with a placeholder so that every booking shares
/// one span name and one metrics series.
pub(super) fn normalise_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            normalise_path("/admin/bookings/0190d7f4-5a3b-7c2e-9d1f-2b3c4d5e6f70/status"),
            "/admin/bookings/{uuid}/status"
        );
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(normalise_path("/"), "/");
        assert_eq!(normalise_path("/bookings/options"), "/bookings/options");
        assert_eq!(normalise_path("/admin/bookings/"), "/admin/bookings");
    }
}
