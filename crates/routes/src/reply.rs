//! Chat reply composition.
//!
//! Renders the Markdown summary sent back to the rider: discipline,
//! distance, climbing, an estimated duration, and the download reference
//! for the GPX file. The file-serving collaborator decodes the reference's
//! query string back into the same request before regenerating the track.

use crate::gpx;
use crate::models::RideRequest;
use crate::profiles::PracticeProfile;
use crate::query;

/// Path the file-serving collaborator exposes for GPX downloads.
const DOWNLOAD_PATH: &str = "/download/route";

/// Composes the Markdown summary for a parsed ride request.
pub fn compose(request: &RideRequest) -> String {
    let profile = PracticeProfile::for_practice(&request.practice_type);
    let filename = gpx::gpx_filename(request);

    let mut reply = format!(
        "Here is your {} loop from {}:\n",
        request.practice_type, request.address
    );
    reply.push_str(&format!("- Distance: {} km\n", request.distance_km));
    reply.push_str(&format!(
        "- Elevation gain: {} m D+\n",
        request.elevation_gain_m
    ));

    if let Some(duration) = format_duration(request.distance_km / profile.speed_kmh) {
        reply.push_str(&format!("- Estimated time: {duration}\n"));
    }

    reply.push_str(&format!(
        "\n[Download {filename}]({DOWNLOAD_PATH}?{})",
        query::to_query_string(request)
    ));
    reply
}

/// Formats a duration in fractional hours as `2h00`, `1h30`, or `45 min`.
///
/// Returns `None` for non-finite or non-positive values; callers drop the
/// duration line entirely.
pub fn format_duration(hours: f64) -> Option<String> {
    if !hours.is_finite() || hours <= 0.0 {
        return None;
    }

    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    if h > 0 {
        Some(format!("{h}h{m:02}"))
    } else {
        Some(format!("{m} min"))
    }
}
