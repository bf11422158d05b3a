//! Riding discipline profiles.
//!
//! Each discipline maps to an estimated average speed (used for track
//! timing and the chat duration estimate) and a roughness factor (how much
//! the synthesized loop wanders off the ideal circle). Labels are free
//! text, so resolution is keyword containment rather than an exact match.

/// Speed and roughness characteristics for one riding discipline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PracticeProfile {
    /// Estimated average speed in km/h.
    pub speed_kmh: f64,
    /// Radius jitter multiplier; higher values produce more ragged loops.
    pub roughness: f64,
}

impl PracticeProfile {
    /// Resolves a profile from a free-text practice label.
    ///
    /// Keywords are checked on the lowercased label, first match wins.
    pub fn for_practice(practice: &str) -> Self {
        let label = practice.to_lowercase();

        let speed_kmh = if contains_any(&label, &["road", "endurance", "training"]) {
            28.0
        } else if contains_any(&label, &["gravel", "bikepacking"]) {
            22.0
        } else if contains_any(&label, &["mtb", "vtt", "trail", "all-mountain"]) {
            16.0
        } else if contains_any(&label, &["commute", "city", "urban"]) {
            18.0
        } else {
            20.0
        };

        let roughness = if contains_any(&label, &["mtb", "vtt", "trail", "all-mountain"]) {
            1.3
        } else if contains_any(&label, &["gravel", "bikepacking"]) {
            1.1
        } else {
            0.8
        };

        Self {
            speed_kmh,
            roughness,
        }
    }
}

/// Total ride duration in seconds for a distance at an average speed.
///
/// Floored at ten minutes; the speed divisor is floored at 5 km/h so a
/// degenerate profile can never stretch the ride toward infinity.
pub fn ride_duration_secs(distance_km: f64, speed_kmh: f64) -> f64 {
    (distance_km / speed_kmh.max(5.0) * 3600.0).max(600.0)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_disciplines_are_fast_and_smooth() {
        let profile = PracticeProfile::for_practice("Road");
        assert_eq!(profile.speed_kmh, 28.0);
        assert_eq!(profile.roughness, 0.8);

        assert_eq!(PracticeProfile::for_practice("endurance").speed_kmh, 28.0);
        assert_eq!(PracticeProfile::for_practice("training").speed_kmh, 28.0);
    }

    #[test]
    fn off_road_disciplines_are_slow_and_rough() {
        for label in ["mtb", "VTT", "trail", "all-mountain"] {
            let profile = PracticeProfile::for_practice(label);
            assert_eq!(profile.speed_kmh, 16.0, "speed for {label}");
            assert_eq!(profile.roughness, 1.3, "roughness for {label}");
        }
    }

    #[test]
    fn gravel_sits_between() {
        let profile = PracticeProfile::for_practice("bikepacking gravel");
        assert_eq!(profile.speed_kmh, 22.0);
        assert_eq!(profile.roughness, 1.1);
    }

    #[test]
    fn commute_speed_with_default_roughness() {
        let profile = PracticeProfile::for_practice("urban commute");
        assert_eq!(profile.speed_kmh, 18.0);
        assert_eq!(profile.roughness, 0.8);
    }

    #[test]
    fn unknown_labels_fall_back_to_defaults() {
        let profile = PracticeProfile::for_practice("cyclocross");
        assert_eq!(profile.speed_kmh, 20.0);
        assert_eq!(profile.roughness, 0.8);
    }

    #[test]
    fn speed_keywords_win_over_later_rules() {
        // "road" is checked before "commute"; mixed labels resolve to the
        // first matching rule.
        let profile = PracticeProfile::for_practice("road commute");
        assert_eq!(profile.speed_kmh, 28.0);
    }

    #[test]
    fn duration_is_floored_at_ten_minutes() {
        assert_eq!(ride_duration_secs(0.5, 28.0), 600.0);
    }

    #[test]
    fn duration_scales_with_distance() {
        // 56 km at 28 km/h is exactly two hours.
        assert_eq!(ride_duration_secs(56.0, 28.0), 7200.0);
    }
}
