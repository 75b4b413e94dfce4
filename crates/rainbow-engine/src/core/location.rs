use crate::error::{CoordinateField, CoordinateParseError};

/// Observer position on the WGS-84 ellipsoid, in degrees.
///
/// Latitude is in [-90, 90]; longitude in [-180, 180], east positive.
/// Only constructed through [`GeoCoordinate::new`] or
/// [`GeoCoordinate::parse`], so a held value is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    /// Validate numeric degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateParseError> {
        let latitude = check_range(CoordinateField::Latitude, latitude, Self::LATITUDE_RANGE)?;
        let longitude = check_range(CoordinateField::Longitude, longitude, Self::LONGITUDE_RANGE)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the two decimal text fields of the location form.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateParseError> {
        let lat = parse_field(CoordinateField::Latitude, latitude)?;
        let lon = parse_field(CoordinateField::Longitude, longitude)?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn parse_field(field: CoordinateField, text: &str) -> Result<f64, CoordinateParseError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateParseError::NotANumber {
            field,
            text: text.to_string(),
        })
}

fn check_range(
    field: CoordinateField,
    value: f64,
    (min, max): (f64, f64),
) -> Result<f64, CoordinateParseError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CoordinateParseError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_decimals() {
        let c = GeoCoordinate::parse(" 51.4769 ", "-0.0005").unwrap();
        assert_eq!(c.latitude(), 51.4769);
        assert_eq!(c.longitude(), -0.0005);
    }

    #[test]
    fn rejects_text_latitude() {
        let err = GeoCoordinate::parse("abc", "12.3").unwrap_err();
        assert_eq!(
            err,
            CoordinateParseError::NotANumber {
                field: CoordinateField::Latitude,
                text: "abc".to_string(),
            }
        );
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert!(GeoCoordinate::parse("", "0").is_err());
        assert!(GeoCoordinate::parse("0", "inf").is_err());
        assert!(GeoCoordinate::parse("NaN", "0").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = GeoCoordinate::parse("90.5", "0").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::OutOfRange { field: CoordinateField::Latitude, .. }
        ));
        let err = GeoCoordinate::parse("0", "181").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::OutOfRange { field: CoordinateField::Longitude, .. }
        ));
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
    }
}
