//! GPX document generation.
//!
//! Serializes a synthesized route as GPX 1.1 with a metadata block and a
//! single track segment, and derives a download filename from the request.
//!
//! The generated document includes:
//! - Standard GPX 1.1 header with schema declarations
//! - Metadata naming the discipline and describing the ride
//! - One track with a single track segment
//! - Per point: lat/lon at 6 decimals, elevation at 1 decimal, RFC 3339 time

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{RideRequest, TrackPoint};

/// Filename prefix and extension for generated documents.
const FILE_PREFIX: &str = "ride";
const FILE_EXT: &str = "gpx";

/// Fallback slug when the practice label contains nothing usable.
const DEFAULT_SLUG: &str = "route";

/// Generates the GPX document for a request, anchored at the current
/// wall-clock minute.
///
/// This is the only side-effecting call in the crate; everything else is a
/// pure function of the request.
pub fn build_gpx(request: &RideRequest, points: &[TrackPoint]) -> String {
    build_gpx_at(request, points, start_of_current_minute())
}

/// Generates the GPX document with an explicit start time.
///
/// Point timestamps are `start` plus each point's time offset. With a fixed
/// start the output is byte-for-byte reproducible.
pub fn build_gpx_at(request: &RideRequest, points: &[TrackPoint], start: OffsetDateTime) -> String {
    let mut gpx = String::new();

    gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    gpx.push('\n');
    gpx.push_str(r#"<gpx version="1.1" creator="routes""#);
    gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
    gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
    gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
    gpx.push('\n');

    let name = format!("{} route", request.practice_type);
    let description = format!("{} km from {}", rounded_km(request), request.address);

    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&name)));
    gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&description)));
    gpx.push_str("  </metadata>\n");

    gpx.push_str("  <trk>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&name)));
    gpx.push_str("    <trkseg>\n");

    for point in points {
        gpx.push_str(&format!(
            r#"      <trkpt lat="{:.6}" lon="{:.6}">"#,
            point.lat, point.lon
        ));
        gpx.push('\n');
        gpx.push_str(&format!("        <ele>{:.1}</ele>\n", point.elevation));

        let timestamp = start + time::Duration::seconds_f64(point.time_offset_secs);
        let formatted = timestamp.format(&Rfc3339).unwrap_or_default();
        gpx.push_str(&format!("        <time>{formatted}</time>\n"));

        gpx.push_str("      </trkpt>\n");
    }

    gpx.push_str("    </trkseg>\n");
    gpx.push_str("  </trk>\n");
    gpx.push_str("</gpx>\n");

    gpx
}

/// Download filename for a request: `ride-<practice-slug>-<km>km.gpx`.
pub fn gpx_filename(request: &RideRequest) -> String {
    let mut slug = slugify(&request.practice_type);
    if slug.is_empty() {
        slug = DEFAULT_SLUG.to_string();
    }
    format!("{FILE_PREFIX}-{slug}-{}km.{FILE_EXT}", rounded_km(request))
}

/// Distance rounded to whole kilometers, floored at 1.
fn rounded_km(request: &RideRequest) -> i64 {
    (request.distance_km.round() as i64).max(1)
}

/// Current UTC time truncated to the minute.
fn start_of_current_minute() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_second(0)
        .and_then(|t| t.replace_nanosecond(0))
        .unwrap_or(now)
}

/// Lowercased, accent-stripped label with non-alphanumeric runs collapsed
/// to single hyphens.
fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
