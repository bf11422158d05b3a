//! Free-text ride request parsing.
//!
//! Messages arrive either as structured commands
//! (`/route address: ...; distance: 60 km; ...`) or as free prose. Parsing
//! is a cascade of ordered classifier rules: labeled fragments first,
//! positional unit-sniffing second, prose scans over the whole message
//! last. Every rule is pure and either commits a field or leaves the state
//! untouched; a request is only produced once all four fields resolve.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::RideRequest;

/// Token that gates parsing: messages without it are not route requests.
const MARKER: &str = "route";

/// Leading `/route` command marker.
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*/route\b").expect("command pattern is valid"));

/// Any remaining marker-token occurrence.
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)route").expect("marker pattern is valid"));

// Label synonyms, checked in this order; the first matching rule claims the
// fragment even when its value later fails to parse.
static ADDRESS_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)address|adresse|from|depuis").expect("address label pattern"));
static PRACTICE_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)practice|pratique|type|discipline").expect("practice label pattern")
});
static DISTANCE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)distance|km").expect("distance label pattern"));
static ELEVATION_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)d\+|elevation|gain|denivel|climb").expect("elevation label pattern")
});

/// Leading numeric literal with an optional kilometer unit.
static DISTANCE_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(-?\d+(?:[.,]\d+)?)\s*(?:kms?\b|kilomet(?:er|re)s?\b)?")
        .expect("distance value pattern")
});

/// Leading numeric literal with an optional meter unit and `D+` marker.
static ELEVATION_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(-?\d+(?:[.,]\d+)?)\s*(?:m\b|met(?:er|re)s?\b)?\s*(?:d\+)?")
        .expect("elevation value pattern")
});

/// Prose scan for a start address, value terminated by a field keyword, a
/// separator, or the end of the message.
static ADDRESS_SCAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:address|adresse|from|depuis|starting\s+at|departing\s+from)\b\s*[:=]?\s*([^,;\n]+?)\s*(?:[,;\n]|\b(?:distance|km|elevation|gain|denivel|climb|practice|pratique|type|discipline)\b|$)",
    )
    .expect("address scan pattern")
});

/// Prose scan for a practice label: keyword followed by a letter/space run.
static PRACTICE_SCAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:practice|pratique|type|discipline)\b\s*[:=]?\s*([a-zA-Z][a-zA-Z ]*)")
        .expect("practice scan pattern")
});

/// Parses a chat message into a ride request.
///
/// Returns `None` when the message carries no route marker or when any of
/// the four required fields cannot be resolved. A partially-filled request
/// is never exposed.
pub fn parse(text: &str) -> Option<RideRequest> {
    if !text.to_lowercase().contains(MARKER) {
        return None;
    }

    let without_command = COMMAND_RE.replace(text, "");
    let body = MARKER_RE.replace_all(&without_command, "");

    let mut address: Option<String> = None;
    let mut distance_km: Option<f64> = None;
    let mut elevation_gain_m: Option<f64> = None;
    let mut practice_type: Option<String> = None;

    for fragment in fragments(&body) {
        let (label, value) = split_label(fragment);

        if !label.is_empty() && ADDRESS_LABEL_RE.is_match(label) {
            set_text(&mut address, value);
        } else if !label.is_empty() && PRACTICE_LABEL_RE.is_match(label) {
            set_text(&mut practice_type, value);
        } else if !label.is_empty() && DISTANCE_LABEL_RE.is_match(label) {
            if distance_km.is_none() {
                distance_km = parse_distance(value);
            }
        } else if !label.is_empty() && ELEVATION_LABEL_RE.is_match(label) {
            if elevation_gain_m.is_none() {
                elevation_gain_m = parse_elevation(value);
            }
        } else if distance_km.is_none()
            && let Some(distance) = parse_distance(value)
        {
            distance_km = Some(distance);
        } else if elevation_gain_m.is_none()
            && let Some(elevation) = parse_elevation(value)
        {
            elevation_gain_m = Some(elevation);
        } else if address.is_none() {
            set_text(&mut address, value);
        } else if practice_type.is_none() {
            set_text(&mut practice_type, value);
        } else {
            debug!(fragment, "dropping unclassifiable fragment");
        }
    }

    // Fields the segment pass missed may still be present as prose; these
    // scans run over the original, unsegmented message.
    if address.is_none() {
        address = scan_address(text);
    }
    if practice_type.is_none() {
        practice_type = scan_practice(text);
    }

    match (address, distance_km, elevation_gain_m, practice_type) {
        (Some(address), Some(distance_km), Some(elevation_gain_m), Some(practice_type)) => {
            debug!(
                %address,
                distance_km,
                elevation_gain_m,
                %practice_type,
                "parsed ride request"
            );
            Some(RideRequest {
                address,
                distance_km,
                elevation_gain_m,
                practice_type,
            })
        }
        _ => {
            debug!("message matched the route marker but fields were incomplete");
            None
        }
    }
}

/// Splits the marker-stripped body into trimmed, non-empty fragments:
/// newlines and semicolons first, then commas within each segment.
fn fragments(body: &str) -> impl Iterator<Item = &str> {
    body.split(['\n', ';'])
        .flat_map(|segment| segment.split(','))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

/// Splits a fragment at the first `:` or `=` into (label, value).
///
/// Without a separator the whole fragment is the value and the label is
/// empty.
fn split_label(fragment: &str) -> (&str, &str) {
    match fragment.find([':', '=']) {
        Some(idx) => (fragment[..idx].trim(), fragment[idx + 1..].trim()),
        None => ("", fragment),
    }
}

fn set_text(slot: &mut Option<String>, value: &str) {
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

/// Parses a distance value in kilometers.
///
/// Accepts a comma as decimal separator and an optional kilometer unit;
/// rejects non-finite and non-positive results.
pub fn parse_distance(value: &str) -> Option<f64> {
    let caps = DISTANCE_VALUE_RE.captures(value)?;
    let number: f64 = caps[1].replace(',', ".").parse().ok()?;
    (number.is_finite() && number > 0.0).then_some(number)
}

/// Parses an elevation gain value in meters.
///
/// Same numeric grammar as distances, with an optional meter unit and a
/// trailing `D+` marker; rejects non-finite and negative results, zero is
/// valid.
pub fn parse_elevation(value: &str) -> Option<f64> {
    let caps = ELEVATION_VALUE_RE.captures(value)?;
    let number: f64 = caps[1].replace(',', ".").parse().ok()?;
    (number.is_finite() && number >= 0.0).then_some(number)
}

fn scan_address(text: &str) -> Option<String> {
    let value = ADDRESS_SCAN_RE.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn scan_practice(text: &str) -> Option<String> {
    let value = PRACTICE_SCAN_RE.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}
