//! Nearest rental location returned when the final step succeeds.

use serde::{Deserialize, Serialize};

/// The rental partner closest to the requested ZIP code.
///
/// Read-only; captured once from the final step's response and shown on
/// the success page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearestLocation {
    /// Location name.
    pub name: Option<String>,
    /// Street address.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Distance from the requested ZIP, in miles.
    pub distance_miles: Option<f64>,
}

impl NearestLocation {
    /// Whether the response carried anything worth showing.
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
            &self.phone,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
            && self.distance_miles.is_none()
    }

    /// Single-line address: `street - state - country - zip`, blanks skipped.
    pub fn address_line(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.street, &self.state, &self.country, &self.postal_code]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" - "))
        }
    }

    /// Human-readable distance, e.g. `Approx 3.2 miles from your location`.
    pub fn distance_label(&self) -> Option<String> {
        let miles = self.distance_miles?;
        let unit = if (miles - 1.0).abs() < f64::EPSILON {
            "mile"
        } else {
            "miles"
        };
        Some(format!("Approx {miles:.1} {unit} from your location"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NearestLocation {
        NearestLocation {
            name: Some("Lancaster Rentals".into()),
            street: Some("12 Main St".into()),
            city: Some("Lancaster".into()),
            state: Some("PA".into()),
            postal_code: Some("17601".into()),
            country: Some("US".into()),
            phone: Some("7175550100".into()),
            distance_miles: Some(3.24),
        }
    }

    #[test]
    fn address_line_joins_parts() {
        assert_eq!(
            sample().address_line().as_deref(),
            Some("12 Main St - PA - US - 17601")
        );
    }

    #[test]
    fn address_line_skips_blanks() {
        let loc = NearestLocation {
            street: Some("  ".into()),
            state: Some("PA".into()),
            ..Default::default()
        };
        assert_eq!(loc.address_line().as_deref(), Some("PA"));
        assert_eq!(NearestLocation::default().address_line(), None);
    }

    #[test]
    fn distance_label_pluralizes() {
        assert_eq!(
            sample().distance_label().as_deref(),
            Some("Approx 3.2 miles from your location")
        );
        let one = NearestLocation {
            distance_miles: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            one.distance_label().as_deref(),
            Some("Approx 1.0 mile from your location")
        );
        assert_eq!(NearestLocation::default().distance_label(), None);
    }

    #[test]
    fn empty_detection() {
        assert!(NearestLocation::default().is_empty());
        assert!(!sample().is_empty());
    }
}
