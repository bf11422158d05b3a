//! Synthetic route generation.
//!
//! Builds a closed loop of track points around a seed-derived anchor with a
//! three-phase elevation profile (ascent, plateau, descent) and uniform
//! pacing. The random stream is seeded from the address and practice text,
//! so identical requests always produce identical tracks.
//!
//! The anchor has no relation to the real-world location named by the
//! address: no geocoding happens anywhere. A deployment with a geocoder
//! would keep everything below and only replace the anchor derivation.

use std::f64::consts::TAU;

use tracing::debug;

use crate::models::{RideRequest, TrackPoint};
use crate::profiles::{self, PracticeProfile};
use crate::rng::SeededRng;

/// Hard bounds on the number of points in a synthesized track.
const MIN_POINTS: usize = 12;
const MAX_POINTS: usize = 240;

/// Points generated per requested kilometer.
const POINTS_PER_KM: f64 = 6.0;

/// Kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Synthesizes a closed-loop track for a ride request.
///
/// The sequence is finite and generated in one pass; the internal random
/// stream is consumed monotonically and never shared. First and last point
/// carry identical coordinates and elevation.
pub fn synthesize(request: &RideRequest) -> Vec<TrackPoint> {
    let seed = format!("{}{}", request.address, request.practice_type);
    let mut rng = SeededRng::from_seed_text(&seed);
    let profile = PracticeProfile::for_practice(&request.practice_type);

    let count = point_count(request.distance_km);
    let (ascent_len, plateau_len) = phase_split(count);
    let descent_len = count - 1 - ascent_len - plateau_len;

    let base_lat = rng.next_f64() * 140.0 - 70.0;
    let base_lon = rng.next_f64() * 360.0 - 180.0;

    let radius_km = (request.distance_km / TAU).max(1.0);
    let radius_lat = radius_km / KM_PER_DEGREE;
    let radius_lon = radius_km / (KM_PER_DEGREE * effective_cos(base_lat));

    let total_secs = profiles::ride_duration_secs(request.distance_km, profile.speed_kmh);

    // The first point sits at the base elevation; the descent phase eases
    // back toward it so the loop closes without a hard snap.
    let mut elevation = 80.0 + rng.next_f64() * 600.0;
    let base_elevation = elevation;

    let ascent_step = request.elevation_gain_m / ascent_len as f64;
    let mut remaining_gain = request.elevation_gain_m;
    let mut descent_target: Option<f64> = None;

    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        if i == 0 {
            // start sample, no elevation change
        } else if i <= ascent_len {
            // Every ascent point climbs by the even step with ±15% jitter,
            // except the last, which consumes exactly the unallocated gain
            // so the cumulative ascent matches the request regardless of
            // jitter drift.
            let gained = if i == ascent_len {
                remaining_gain
            } else {
                (ascent_step * (0.85 + rng.next_f64() * 0.3)).clamp(0.0, remaining_gain)
            };
            remaining_gain -= gained;
            elevation += gained;
        } else if i <= ascent_len + plateau_len {
            elevation += (rng.next_f64() * 2.0 - 1.0) * ascent_step * 0.1;
        } else {
            // Proportional approach toward a target just under the base
            // elevation; the pull grows from 15% to 55% of the gap as the
            // phase progresses.
            let target =
                *descent_target.get_or_insert_with(|| base_elevation - rng.next_f64() * 20.0);
            let step_index = (i - ascent_len - plateau_len) as f64;
            let pull = 0.15 + 0.40 * step_index / descent_len as f64;
            elevation += (target - elevation) * pull;
        }
        elevation = elevation.max(0.0);

        let angle = TAU * i as f64 / count as f64;
        let jitter = 0.7 + rng.next_f64() * 0.6 * profile.roughness;

        points.push(TrackPoint {
            lat: base_lat + angle.sin() * radius_lat * jitter,
            lon: base_lon + angle.cos() * radius_lon * jitter,
            elevation,
            time_offset_secs: total_secs / count as f64 * i as f64,
        });
    }

    // Force the geometric loop closed; timing stays as computed.
    let first = points[0];
    if let Some(last) = points.last_mut() {
        last.lat = first.lat;
        last.lon = first.lon;
        last.elevation = first.elevation;
    }

    debug!(
        count,
        ascent = ascent_len,
        plateau = plateau_len,
        descent = descent_len,
        distance_km = request.distance_km,
        "synthesized route"
    );

    points
}

/// Number of track points for a distance, six per kilometer within bounds.
fn point_count(distance_km: f64) -> usize {
    (distance_km * POINTS_PER_KM)
        .round()
        .clamp(MIN_POINTS as f64, MAX_POINTS as f64) as usize
}

/// Splits the point count into (ascent, plateau) lengths; the descent takes
/// whatever remains after the start sample.
fn phase_split(count: usize) -> (usize, usize) {
    let ascent = ((count as f64 * 0.4).round() as usize).max(3);
    let plateau = ((count as f64 * 0.2).round() as usize).max(2);
    (ascent, plateau)
}

/// Cosine of the anchor latitude used for the longitude radius.
///
/// Its magnitude is floored at 0.1 (keeping the cosine's sign) so the
/// longitude radius cannot blow up near the poles.
fn effective_cos(lat: f64) -> f64 {
    let cos = lat.to_radians().cos();
    if cos.abs() > 0.1 {
        cos
    } else if cos == 0.0 {
        0.1
    } else {
        0.1_f64.copysign(cos)
    }
}
