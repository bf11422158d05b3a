//! Download query-string round-tripping.
//!
//! The chat reply embeds the ride parameters in its download reference; the
//! file-serving collaborator decodes them back into the same request shape
//! before re-running synthesis. Decoding failures are reported, never
//! retried: the operation is pure and would fail identically again.

use urlencoding::{decode, encode};

use crate::errors::QueryError;
use crate::models::RideRequest;

/// Encodes a request as the download reference's query string.
pub fn to_query_string(request: &RideRequest) -> String {
    format!(
        "address={}&distance_km={}&elevation_gain_m={}&practice_type={}",
        encode(&request.address),
        request.distance_km,
        request.elevation_gain_m,
        encode(&request.practice_type),
    )
}

/// Decodes a query string back into a ride request.
///
/// Missing or invalid required fields are the caller's mistake; the
/// collaborator maps the error to a 4xx response.
pub fn from_query_string(query: &str) -> Result<RideRequest, QueryError> {
    let mut address = None;
    let mut distance_km = None;
    let mut elevation_gain_m = None;
    let mut practice_type = None;

    for pair in query.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());

        match key {
            "address" => address = Some(value),
            "distance_km" => distance_km = Some(value),
            "elevation_gain_m" => elevation_gain_m = Some(value),
            "practice_type" => practice_type = Some(value),
            _ => {}
        }
    }

    let address = address
        .filter(|v| !v.is_empty())
        .ok_or(QueryError::MissingParam("address"))?;
    let practice_type = practice_type
        .filter(|v| !v.is_empty())
        .ok_or(QueryError::MissingParam("practice_type"))?;

    let distance_km = require_f64("distance_km", distance_km)?;
    if distance_km <= 0.0 {
        return Err(QueryError::InvalidParam {
            name: "distance_km",
            value: distance_km.to_string(),
        });
    }

    let elevation_gain_m = require_f64("elevation_gain_m", elevation_gain_m)?;
    if elevation_gain_m < 0.0 {
        return Err(QueryError::InvalidParam {
            name: "elevation_gain_m",
            value: elevation_gain_m.to_string(),
        });
    }

    Ok(RideRequest {
        address,
        distance_km,
        elevation_gain_m,
        practice_type,
    })
}

fn require_f64(name: &'static str, value: Option<String>) -> Result<f64, QueryError> {
    let raw = value.ok_or(QueryError::MissingParam(name))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(QueryError::InvalidParam { name, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RideRequest {
        RideRequest {
            address: "10 Downing Street, London".into(),
            distance_km: 45.5,
            elevation_gain_m: 0.0,
            practice_type: "gravel & road".into(),
        }
    }

    #[test]
    fn query_round_trips_the_request() {
        let query = to_query_string(&request());
        let back = from_query_string(&query).unwrap();
        assert_eq!(back, request());
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let query = to_query_string(&request());
        assert!(query.contains("address=10%20Downing%20Street%2C%20London"));
        assert!(query.contains("practice_type=gravel%20%26%20road"));
        assert!(!query.contains(' '));
    }

    #[test]
    fn leading_question_mark_is_tolerated() {
        let query = format!("?{}", to_query_string(&request()));
        assert_eq!(from_query_string(&query).unwrap(), request());
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        assert_eq!(
            from_query_string("distance_km=60&elevation_gain_m=800&practice_type=road"),
            Err(QueryError::MissingParam("address"))
        );
        assert_eq!(
            from_query_string("address=Lyon&distance_km=60&elevation_gain_m=800"),
            Err(QueryError::MissingParam("practice_type"))
        );
    }

    #[test]
    fn non_numeric_values_are_invalid() {
        let result =
            from_query_string("address=Lyon&distance_km=far&elevation_gain_m=800&practice_type=road");
        assert_eq!(
            result,
            Err(QueryError::InvalidParam {
                name: "distance_km",
                value: "far".into()
            })
        );
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        assert!(matches!(
            from_query_string("address=Lyon&distance_km=0&elevation_gain_m=800&practice_type=road"),
            Err(QueryError::InvalidParam {
                name: "distance_km",
                ..
            })
        ));
        assert!(matches!(
            from_query_string(
                "address=Lyon&distance_km=60&elevation_gain_m=-5&practice_type=road"
            ),
            Err(QueryError::InvalidParam {
                name: "elevation_gain_m",
                ..
            })
        ));
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let query = format!("{}&utm_source=chat", to_query_string(&request()));
        assert_eq!(from_query_string(&query).unwrap(), request());
    }
}
