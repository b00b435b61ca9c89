//! Coordinate parsing and representation (spec §3, §6).

use crate::error::{Error, Result};

/// A location: a lat/long pair (real instances) or an (x, y[, z]) point
/// (synthetic TSPLIB instances).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    /// A 2-D point.
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// A 3-D point.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
        }
    }

    /// Parses a `"latitude,longitude"` string, the wire format for real
    /// instances (coordinate files and routing-provider requests).
    ///
    /// Returns `BadInput("origin or destination invalid")` on any
    /// malformed input, matching the routing-client failure mode in §4.2.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_ga_core::models::Coordinate;
    ///
    /// let c = Coordinate::parse_latlong("35.7,51.4").unwrap();
    /// assert_eq!(c.x, 35.7);
    /// assert_eq!(c.y, 51.4);
    ///
    /// assert!(Coordinate::parse_latlong("not-a-coord").is_err());
    /// ```
    pub fn parse_latlong(text: &str) -> Result<Self> {
        let invalid = || Error::BadInput("origin or destination invalid".to_string());

        let trimmed = text.trim();
        let mut parts = trimmed.splitn(2, ',');
        let lat = parts.next().ok_or_else(invalid)?.trim();
        let long = parts.next().ok_or_else(invalid)?.trim();
        if lat.is_empty() || long.is_empty() {
            return Err(invalid());
        }

        let lat: f64 = lat.parse().map_err(|_| invalid())?;
        let long: f64 = long.parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !long.is_finite() {
            return Err(invalid());
        }

        Ok(Self::xy(lat, long))
    }

    /// Renders back into `"lat,long"` form for outbound provider requests.
    pub fn to_latlong(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_latlong() {
        let c = Coordinate::parse_latlong("35.7,51.4").unwrap();
        assert_eq!(c.x, 35.7);
        assert_eq!(c.y, 51.4);
        assert_eq!(c.z, None);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let c = Coordinate::parse_latlong("  35.7 , 51.4 ").unwrap();
        assert_eq!(c.x, 35.7);
        assert_eq!(c.y, 51.4);
    }

    #[test]
    fn rejects_missing_comma() {
        assert!(Coordinate::parse_latlong("35.7 51.4").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(Coordinate::parse_latlong("abc,def").is_err());
    }

    #[test]
    fn rejects_empty_component() {
        assert!(Coordinate::parse_latlong("35.7,").is_err());
        assert!(Coordinate::parse_latlong(",51.4").is_err());
    }

    #[test]
    fn round_trips_to_latlong() {
        let c = Coordinate::xy(35.7, 51.4);
        assert_eq!(c.to_latlong(), "35.7,51.4");
    }
}
