//! Short display strings for event distances.
//!
//! Distances reach the display layer either already formatted by the data
//! loader or as measured magnitudes. [`format_distance`] is total: every
//! input yields a string, absent input yields an empty one.
//!
//! | input                | output    |
//! |----------------------|-----------|
//! | `Measured { 0.45 }`  | `"450m"`  |
//! | `Measured { 3.2 }`   | `"3.2km"` |
//! | `Measured { 12.4 }`  | `"12km"`  |
//! | `Preformatted("1.6 km")` | `"1.6 km"` |
//! | `None`               | `""`      |

const KM_PER_MILE: f64 = 1.609_344;

/// A distance as handed to the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceDisplay {
    /// Already formatted upstream; passed through unchanged.
    Preformatted(String),
    /// Measured magnitudes in both unit systems.
    Measured { km: f64, miles: f64 },
}

impl DistanceDisplay {
    /// Build a measured distance from kilometers, deriving miles.
    pub fn from_km(km: f64) -> Self {
        Self::Measured {
            km,
            miles: km / KM_PER_MILE,
        }
    }
}

/// Format a distance for display.
pub fn format_distance(distance: Option<&DistanceDisplay>) -> String {
    match distance {
        None => String::new(),
        Some(DistanceDisplay::Preformatted(text)) => text.clone(),
        Some(DistanceDisplay::Measured { km, .. }) => format_km(*km),
    }
}

/// Pure function: kilometers to `450m` / `3.2km` / `12km`.
///
/// Non-finite and negative magnitudes have no sensible rendering and
/// produce an empty string.
pub fn format_km(km: f64) -> String {
    if !km.is_finite() || km < 0.0 {
        return String::new();
    }

    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as u64)
    } else if km < 10.0 {
        format!("{:.1}km", km)
    } else {
        format!("{}km", km.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(km: f64) -> DistanceDisplay {
        DistanceDisplay::from_km(km)
    }

    #[test]
    fn test_under_one_km_renders_meters() {
        assert_eq!(format_distance(Some(&measured(0.45))), "450m");
        assert_eq!(format_distance(Some(&measured(0.0))), "0m");
    }

    #[test]
    fn test_single_digit_km_has_one_decimal() {
        assert_eq!(format_distance(Some(&measured(3.2))), "3.2km");
        assert_eq!(format_distance(Some(&measured(1.0))), "1.0km");
        assert_eq!(format_distance(Some(&measured(9.94))), "9.9km");
    }

    #[test]
    fn test_ten_km_and_above_rounds_to_whole() {
        assert_eq!(format_distance(Some(&measured(12.4))), "12km");
        assert_eq!(format_distance(Some(&measured(10.0))), "10km");
        assert_eq!(format_distance(Some(&measured(12.5))), "13km");
    }

    #[test]
    fn test_preformatted_passes_through() {
        let display = DistanceDisplay::Preformatted("1.6 km".to_string());
        assert_eq!(format_distance(Some(&display)), "1.6 km");
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(format_distance(None), "");
    }

    #[test]
    fn test_degenerate_magnitudes_are_empty() {
        assert_eq!(format_km(f64::NAN), "");
        assert_eq!(format_km(f64::INFINITY), "");
        assert_eq!(format_km(-1.0), "");
    }

    #[test]
    fn test_from_km_derives_miles() {
        match DistanceDisplay::from_km(KM_PER_MILE) {
            DistanceDisplay::Measured { miles, .. } => assert!((miles - 1.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
    }
}
