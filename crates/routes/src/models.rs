//! Core data types for ride route generation.

use serde::{Deserialize, Serialize};

/// A fully-resolved ride request.
///
/// All four fields are present and individually valid before a value is
/// constructed: the parser and the download-query decoder both return a
/// negative result instead of ever exposing a partially-filled request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    /// Free-text start address as the rider typed it.
    pub address: String,
    /// Requested loop length in kilometers. Positive and finite.
    pub distance_km: f64,
    /// Requested total climbing in meters. Non-negative and finite.
    pub elevation_gain_m: f64,
    /// Riding discipline (road, gravel, mtb, commute, ...).
    pub practice_type: String,
}

/// One sample of a synthesized route.
///
/// Points are ordered by traversal; the first and last point of a track
/// share the same coordinates and elevation (closed loop).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Elevation in meters, never negative.
    pub elevation: f64,
    /// Seconds elapsed since the start of the ride.
    pub time_offset_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ride_request_round_trips_json() {
        let request = RideRequest {
            address: "10 Downing Street".into(),
            distance_km: 60.0,
            elevation_gain_m: 800.0,
            practice_type: "road".into(),
        };

        let json = serde_json::to_string(&request).unwrap();
        let back: RideRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn ride_request_deserializes_tool_call_payload() {
        // Shape emitted by the upstream JSON-directive protocol.
        let payload = r#"{
            "address": "Lyon, France",
            "distance_km": 45.5,
            "elevation_gain_m": 0.0,
            "practice_type": "gravel"
        }"#;

        let request: RideRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.address, "Lyon, France");
        assert_eq!(request.distance_km, 45.5);
        assert_eq!(request.elevation_gain_m, 0.0);
        assert_eq!(request.practice_type, "gravel");
    }
}
