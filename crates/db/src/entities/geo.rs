//! GeoJSON column types.
//!
//! Farm locations and field boundaries are stored as GeoJSON in `jsonb`
//! columns and surfaced as typed structs.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A GeoJSON `Point` (farm location).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct GeoPoint {
    /// Always `"Point"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    /// Build a point from a coordinate pair.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: vec![longitude, latitude],
        }
    }

    /// A point is valid when it has exactly two finite coordinates.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind == "Point"
            && self.coordinates.len() == 2
            && self.coordinates.iter().all(|c| c.is_finite())
    }
}

/// A GeoJSON `Polygon` (field boundary).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct GeoPolygon {
    /// Always `"Polygon"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Linear rings; the first is the outer boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoPolygon {
    /// A polygon is valid when every ring is closed (>= 4 positions) and
    /// every coordinate is finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind == "Polygon"
            && !self.coordinates.is_empty()
            && self.coordinates.iter().all(|ring| {
                ring.len() >= 4
                    && ring.iter().all(|p| p.iter().all(|c| c.is_finite()))
                    && ring.first() == ring.last()
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validity() {
        assert!(GeoPoint::new(23.3219, 42.6977).is_valid());
        assert!(!GeoPoint {
            kind: "Point".into(),
            coordinates: vec![1.0],
        }
        .is_valid());
        assert!(!GeoPoint {
            kind: "Point".into(),
            coordinates: vec![f64::NAN, 0.0],
        }
        .is_valid());
    }

    #[test]
    fn test_polygon_requires_closed_rings() {
        let closed = GeoPolygon {
            kind: "Polygon".into(),
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        };
        assert!(closed.is_valid());

        let open = GeoPolygon {
            kind: "Polygon".into(),
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [2.0, 2.0]]],
        };
        assert!(!open.is_valid());
    }

    #[test]
    fn test_point_json_shape() {
        let point = GeoPoint::new(1.5, 2.5);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], 1.5);
    }
}
