//! GPS coordinate extraction and validation.
//!
//! EXIF stores latitude and longitude as three rationals (degrees, minutes,
//! seconds) plus a hemisphere letter. Everything in here is stateless.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const MAP_BASE_URL: &str = "https://www.google.com/maps";

/// A decoded GPS position.
///
/// `present` records whether the source carried both latitude and longitude
/// tags. It says nothing about range validity, see [`GeoCoordinate::is_valid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub present: bool,
}

impl GeoCoordinate {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            present: true,
        }
    }

    pub fn has_gps(&self) -> bool {
        self.present
    }

    /// Exactly (0, 0) counts as "no fix", so a photo taken at the
    /// equator/prime-meridian intersection is reported as invalid.
    pub fn is_valid(&self) -> bool {
        self.present
            && self.latitude != 0.0
            && self.longitude != 0.0
            && is_valid_range(self.latitude, self.longitude)
    }

    pub fn map_url(&self, zoom: Option<u8>) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        build_map_url(self.latitude, self.longitude, zoom)
    }

    pub fn distance_to(&self, other: &GeoCoordinate) -> f64 {
        distance_meters(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl Display for GeoCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.present {
            return write!(f, "no GPS data");
        }
        write!(f, "lat: {:.6}, lon: {:.6}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ", alt: {altitude:.1} m")?;
        }
        Ok(())
    }
}

/// GPS tags looked up through a [`GpsTagSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsTag {
    Latitude,
    LatitudeRef,
    Longitude,
    LongitudeRef,
    Altitude,
    AltitudeRef,
}

/// Read access to raw GPS tag values.
///
/// Rational values are rendered as `num/den`, multiple components joined by
/// commas. Reference tags are rendered as their letter (`N`, `S`, `E`, `W`) or
/// digit (`0`, `1` for altitude).
pub trait GpsTagSource {
    fn tag(&self, tag: GpsTag) -> Option<String>;
}

/// Parses one `num/den` component into its value.
pub fn parse_rational(component: &str) -> Result<f64, DomainError> {
    let component = component.trim();
    let (num, den) = component
        .split_once('/')
        .ok_or_else(|| DomainError::InvalidRational(component.to_string()))?;
    let num = parse_finite(num).ok_or_else(|| DomainError::InvalidRational(component.to_string()))?;
    let den = parse_finite(den).ok_or_else(|| DomainError::InvalidRational(component.to_string()))?;
    if den == 0.0 {
        return Err(DomainError::ZeroDenominator(component.to_string()));
    }
    Ok(num / den)
}

fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Parses a `deg,min,sec` rational triple into unsigned decimal degrees.
pub fn parse_dms(dms: &str) -> Result<f64, DomainError> {
    let parts: Vec<&str> = dms.split(',').collect();
    if parts.len() != 3 {
        return Err(DomainError::WrongComponentCount(parts.len()));
    }
    let degrees = parse_rational(parts[0])?;
    let minutes = parse_rational(parts[1])?;
    let seconds = parse_rational(parts[2])?;
    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

/// Converts a DMS triple plus hemisphere reference to signed decimal degrees.
///
/// Never fails: absent or malformed input yields `0.0`.
pub fn convert(dms: Option<&str>, reference: Option<&str>) -> f64 {
    let (Some(dms), Some(reference)) = (dms, reference) else {
        return 0.0;
    };
    match parse_dms(dms) {
        Ok(value) if is_negative_hemisphere(reference) => -value,
        Ok(value) => value,
        Err(error) => {
            log::debug!("cannot convert DMS value {dms:?}: {error}");
            0.0
        }
    }
}

fn is_negative_hemisphere(reference: &str) -> bool {
    matches!(reference.trim(), "S" | "W")
}

pub fn is_valid_range(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

pub fn build_map_url(latitude: f64, longitude: f64, zoom: Option<u8>) -> Option<String> {
    if !is_valid_range(latitude, longitude) {
        return None;
    }
    let mut url = format!("{MAP_BASE_URL}?q={latitude:.6},{longitude:.6}");
    if let Some(zoom) = zoom {
        url.push_str(&format!("&z={zoom}"));
    }
    Some(url)
}

/// Reads a coordinate from raw GPS tags.
///
/// Presence only requires the latitude and longitude tags. The converted
/// values are not range-checked here.
pub fn extract_from_source(source: &dyn GpsTagSource) -> GeoCoordinate {
    let (Some(lat), Some(lon)) = (source.tag(GpsTag::Latitude), source.tag(GpsTag::Longitude))
    else {
        return GeoCoordinate::absent();
    };

    let latitude = convert(Some(lat.as_str()), source.tag(GpsTag::LatitudeRef).as_deref());
    let longitude = convert(Some(lon.as_str()), source.tag(GpsTag::LongitudeRef).as_deref());
    let altitude = source
        .tag(GpsTag::Altitude)
        .and_then(|value| parse_altitude(&value))
        .map(|altitude| match source.tag(GpsTag::AltitudeRef).as_deref().map(str::trim) {
            Some("1") => -altitude,
            _ => altitude,
        });

    GeoCoordinate::new(latitude, longitude, altitude)
}

fn parse_altitude(value: &str) -> Option<f64> {
    if value.contains('/') {
        return parse_rational(value).ok();
    }
    parse_finite(value)
}

/// Great-circle distance in meters (haversine, spherical Earth).
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_distance = (lat2 - lat1).to_radians();
    let lon_distance = (lon2 - lon1).to_radians();
    let a = (lat_distance / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (lon_distance / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c * 1000.0
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct FakeTags(HashMap<GpsTag, &'static str>);

    impl FakeTags {
        fn new(entries: &[(GpsTag, &'static str)]) -> Self {
            Self(entries.iter().copied().collect())
        }
    }

    impl GpsTagSource for FakeTags {
        fn tag(&self, tag: GpsTag) -> Option<String> {
            self.0.get(&tag).map(|value| value.to_string())
        }
    }

    #[test]
    fn converts_seoul_latitude() {
        let value = convert(Some("37/1,33/1,9/1"), Some("N"));
        assert!((value - 37.5525).abs() < 1e-9);
    }

    #[test]
    fn southern_and_western_references_negate() {
        for dms in ["37/1,33/1,9/1", "126/1,58/1,4068/100", "0/1,30/1,0/1"] {
            assert_eq!(convert(Some(dms), Some("S")), -convert(Some(dms), Some("N")));
            assert_eq!(convert(Some(dms), Some("W")), -convert(Some(dms), Some("E")));
        }
    }

    #[test]
    fn unknown_reference_keeps_sign() {
        assert_eq!(convert(Some("10/1,0/1,0/1"), Some("X")), 10.0);
    }

    #[test]
    fn malformed_input_converts_to_zero() {
        assert_eq!(convert(None, Some("N")), 0.0);
        assert_eq!(convert(Some("10/1,0/1,0/1"), None), 0.0);
        assert_eq!(convert(Some(""), Some("N")), 0.0);
        assert_eq!(convert(Some("10/0,0/1,0/1"), Some("N")), 0.0);
        assert_eq!(convert(Some("10/1,0/1"), Some("N")), 0.0);
        assert_eq!(convert(Some("10/1,0/1,0/1,0/1"), Some("N")), 0.0);
        assert_eq!(convert(Some("a/1,0/1,0/1"), Some("N")), 0.0);
        assert_eq!(convert(Some("10,0/1,0/1"), Some("N")), 0.0);
    }

    #[test]
    fn parse_dms_reports_why_it_failed() {
        assert!(matches!(
            parse_dms("1/1,2/1"),
            Err(DomainError::WrongComponentCount(2))
        ));
        assert!(matches!(
            parse_dms("1/1,2/0,3/1"),
            Err(DomainError::ZeroDenominator(_))
        ));
        assert!(matches!(
            parse_dms("1/1,x/1,3/1"),
            Err(DomainError::InvalidRational(_))
        ));
    }

    #[test]
    fn range_check_is_inclusive() {
        assert!(is_valid_range(90.0, 180.0));
        assert!(is_valid_range(-90.0, -180.0));
        assert!(is_valid_range(90.0, -180.0));
        assert!(is_valid_range(-90.0, 180.0));
        assert!(!is_valid_range(91.0, 0.0));
        assert!(!is_valid_range(-91.0, 0.0));
        assert!(!is_valid_range(0.0, 181.0));
        assert!(!is_valid_range(0.0, -181.0));
        assert!(!is_valid_range(f64::NAN, 0.0));
    }

    #[test]
    fn map_url_uses_six_decimals() {
        let url = build_map_url(37.5665, 126.978, None).expect("valid");
        assert_eq!(url, "https://www.google.com/maps?q=37.566500,126.978000");

        let zoomed = build_map_url(-1.5, 2.25, Some(15)).expect("valid");
        assert_eq!(zoomed, "https://www.google.com/maps?q=-1.500000,2.250000&z=15");

        assert!(build_map_url(91.0, 0.0, None).is_none());
    }

    #[test]
    fn missing_latitude_tag_yields_absent_coordinate() {
        let tags = FakeTags::new(&[
            (GpsTag::LatitudeRef, "N"),
            (GpsTag::Longitude, "126/1,58/1,40/1"),
            (GpsTag::LongitudeRef, "E"),
            (GpsTag::Altitude, "38/1"),
        ]);
        let coordinate = extract_from_source(&tags);
        assert!(!coordinate.has_gps());
        assert_eq!(coordinate, GeoCoordinate::absent());
    }

    #[test]
    fn extracts_full_coordinate_with_altitude_below_sea_level() {
        let tags = FakeTags::new(&[
            (GpsTag::Latitude, "33/1,52/1,0/1"),
            (GpsTag::LatitudeRef, "S"),
            (GpsTag::Longitude, "151/1,12/1,36/1"),
            (GpsTag::LongitudeRef, "E"),
            (GpsTag::Altitude, "50/2"),
            (GpsTag::AltitudeRef, "1"),
        ]);
        let coordinate = extract_from_source(&tags);
        assert!(coordinate.has_gps());
        assert!((coordinate.latitude + 33.866_666_666).abs() < 1e-6);
        assert!((coordinate.longitude - 151.21).abs() < 1e-9);
        assert_eq!(coordinate.altitude, Some(-25.0));
        assert!(coordinate.is_valid());
    }

    #[test]
    fn presence_does_not_imply_range_validity() {
        let tags = FakeTags::new(&[
            (GpsTag::Latitude, "120/1,0/1,0/1"),
            (GpsTag::LatitudeRef, "N"),
            (GpsTag::Longitude, "10/1,0/1,0/1"),
            (GpsTag::LongitudeRef, "E"),
        ]);
        let coordinate = extract_from_source(&tags);
        assert!(coordinate.has_gps());
        assert!(!coordinate.is_valid());
        assert_eq!(coordinate.altitude, None);
        assert!(coordinate.map_url(None).is_none());
    }

    #[test]
    fn origin_is_treated_as_invalid() {
        let coordinate = GeoCoordinate::new(0.0, 0.0, None);
        assert!(coordinate.has_gps());
        assert!(!coordinate.is_valid());
    }

    #[test]
    fn distance_is_zero_for_same_point_and_symmetric() {
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0), 0.0);

        let seoul_to_busan = distance_meters(37.5665, 126.978, 35.1796, 129.0756);
        let busan_to_seoul = distance_meters(35.1796, 129.0756, 37.5665, 126.978);
        assert_eq!(seoul_to_busan, busan_to_seoul);
        assert!((seoul_to_busan - 325_000.0).abs() < 5_000.0);

        assert!(distance_meters(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn one_degree_of_latitude_matches_radius() {
        let expected = EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI / 180.0;
        assert!((distance_meters(0.0, 0.0, 1.0, 0.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_to_measures_between_coordinates() {
        let seoul = GeoCoordinate::new(37.5665, 126.978, Some(38.0));
        let busan = GeoCoordinate::new(35.1796, 129.0756, None);
        assert_eq!(
            seoul.distance_to(&busan),
            distance_meters(37.5665, 126.978, 35.1796, 129.0756)
        );
        assert_eq!(seoul.distance_to(&seoul), 0.0);
    }

    #[test]
    fn display_shows_coordinates_or_absence() {
        assert_eq!(GeoCoordinate::absent().to_string(), "no GPS data");
        assert_eq!(
            GeoCoordinate::new(1.0, 2.0, None).to_string(),
            "lat: 1.000000, lon: 2.000000"
        );
    }
}
