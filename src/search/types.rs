//! The search result value model.

use serde::{Deserialize, Serialize};

use crate::codec::dms::{self, DmsError, DmsFormat};

/// A coordinate pair in the axis order (x, y) = (easting/longitude,
/// northing/latitude).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A bounding box, or the distinct "empty" state meaning no extent at all —
/// the result is a single point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    Empty,
    Bounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
}

impl Envelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Envelope::Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Envelope::Empty)
    }
}

/// An EPSG-style coordinate system identifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialReference {
    wkid: u32,
}

impl SpatialReference {
    /// EPSG:27700, the Ordnance Survey National Grid.
    pub const BRITISH_NATIONAL_GRID: SpatialReference = SpatialReference { wkid: 27700 };
    /// EPSG:4326, WGS84 latitude/longitude.
    pub const WGS84: SpatialReference = SpatialReference { wkid: 4326 };

    pub fn new(wkid: u32) -> Self {
        SpatialReference { wkid }
    }

    pub fn wkid(&self) -> u32 {
        self.wkid
    }
}

/// One candidate place. Immutable; equality is field-wise over all six
/// attributes, and `id` alone is the identity used for dedup and recency
/// keying.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Opaque, stable identity.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Secondary descriptive text.
    pub context: String,
    pub point: Point,
    pub envelope: Option<Envelope>,
    pub spatial_reference: SpatialReference,
}

impl SearchResult {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        context: impl Into<String>,
        point: Point,
        envelope: Option<Envelope>,
        spatial_reference: SpatialReference,
    ) -> Self {
        SearchResult {
            id: id.into(),
            name: name.into(),
            context: context.into(),
            point,
            envelope,
            spatial_reference,
        }
    }

    /// Grid-derived specialisation: identity and context come from the
    /// reference name and its easting/northing, on the national grid.
    pub fn grid_reference(name: &str, easting: i32, northing: i32, envelope: Envelope) -> Self {
        SearchResult {
            id: format!("GridRef: {name}"),
            name: name.to_string(),
            context: format!("Easting: {easting}  Northing: {northing}"),
            point: Point::new(easting as f64, northing as f64),
            envelope: Some(envelope),
            spatial_reference: SpatialReference::BRITISH_NATIONAL_GRID,
        }
    }

    /// Lat/lon-derived specialisation: the name is the DMS-seconds rendering
    /// of both axes and the context the six-decimal pair, on WGS84.
    ///
    /// Fails only when either value is outside its axis range.
    pub fn lat_lon(latitude: f64, longitude: f64) -> Result<Self, DmsError> {
        let name = format!(
            "{} {}",
            dms::format_latitude(latitude, DmsFormat::Seconds)?,
            dms::format_longitude(longitude, DmsFormat::Seconds)?
        );
        Ok(SearchResult {
            id: format!("lat: {latitude} lon: {longitude}"),
            name,
            context: format!("{latitude:.6}, {longitude:.6}"),
            point: Point::new(longitude, latitude),
            envelope: Some(Envelope::Empty),
            spatial_reference: SpatialReference::WGS84,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_field_wise() {
        let a = SearchResult::new(
            "1",
            "High Street",
            "Guildford",
            Point::new(1.0, 2.0),
            None,
            SpatialReference::BRITISH_NATIONAL_GRID,
        );
        let mut b = a.clone();
        assert_eq!(a, b);
        b.context = "Godalming".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn absent_and_empty_envelopes_are_distinct() {
        let absent = SearchResult::new(
            "1",
            "x",
            "y",
            Point::new(0.0, 0.0),
            None,
            SpatialReference::WGS84,
        );
        let mut empty = absent.clone();
        empty.envelope = Some(Envelope::Empty);
        assert_ne!(absent, empty);
        assert!(Envelope::Empty.is_empty());
        assert!(!Envelope::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn grid_reference_specialisation() {
        let result = SearchResult::grid_reference(
            "SU41",
            440_000,
            110_000,
            Envelope::new(440_000.0, 110_000.0, 450_000.0, 120_000.0),
        );
        assert_eq!(result.id, "GridRef: SU41");
        assert_eq!(result.name, "SU41");
        assert_eq!(result.context, "Easting: 440000  Northing: 110000");
        assert_eq!(result.point, Point::new(440_000.0, 110_000.0));
        assert_eq!(
            result.spatial_reference,
            SpatialReference::BRITISH_NATIONAL_GRID
        );
    }

    #[test]
    fn lat_lon_specialisation() {
        let result = SearchResult::lat_lon(51.50722, -0.1275).unwrap();
        assert_eq!(result.id, "lat: 51.50722 lon: -0.1275");
        assert_eq!(result.name, "51°30'26.0\"N 0°07'39.0\"W");
        assert_eq!(result.context, "51.507220, -0.127500");
        assert_eq!(result.point, Point::new(-0.1275, 51.50722));
        assert_eq!(result.envelope, Some(Envelope::Empty));
        assert_eq!(result.spatial_reference, SpatialReference::WGS84);
    }
}
