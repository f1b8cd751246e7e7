use serde::{Deserialize, Serialize};
use std::fmt;

mod store;

pub use store::FixtureStore;

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// GeoJSON FeatureCollection of air-quality polygons.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    pub features: Vec<Feature>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    FeatureCollection,
}

/// One region of the sample dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub id: String,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Feature,
}

/// Pollution readings attached to a feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
    pub country: String,
    /// Carbon dioxide (ppm)
    pub co2: f64,
    pub ghg: f64,
    /// Fine particulate matter (µg/m³)
    pub pm25: f64,
    pub ozone: f64,
    pub air_pollution_index: f64,
}

/// Polygon geometry: ordered rings of positions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Vec<Vec<Position>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Polygon,
}

impl Feature {
    /// First position of the first ring.
    ///
    /// This single vertex stands in for the whole polygon in bounding-box
    /// membership tests.
    pub fn anchor(&self) -> Option<Position> {
        self.geometry
            .coordinates
            .first()
            .and_then(|ring| ring.first())
            .copied()
    }
}

/// Axis-aligned rectangle `[minLng, minLat, maxLng, maxLat]`.
///
/// Callers are expected to pass `min <= max` on both axes; nothing is
/// reordered or validated here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BBox {
    /// The whole globe.
    pub const WORLD: BBox = BBox {
        min_lng: -180.0,
        min_lat: -90.0,
        max_lng: 180.0,
        max_lat: 90.0,
    };

    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    /// Square box of `radius` degrees around a position.
    pub fn around(center: Position, radius: f64) -> Self {
        Self::new(
            center[0] - radius,
            center[1] - radius,
            center[0] + radius,
            center[1] + radius,
        )
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, position: Position) -> bool {
        let [lng, lat] = position;
        lng >= self.min_lng && lat >= self.min_lat && lng <= self.max_lng && lat <= self.max_lat
    }
}

impl From<[f64; 4]> for BBox {
    fn from(v: [f64; 4]) -> Self {
        BBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.min_lng, b.min_lat, b.max_lng, b.max_lat]
    }
}

/// Errors raised while loading a fixture dataset
#[derive(Debug)]
pub enum FixtureError {
    Io(String, std::io::Error),
    Parse(serde_json::Error),
    EmptyGeometry(String),
    DuplicateId(String),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Io(path, e) => {
                write!(f, "failed to read fixtures from '{}': {}", path, e)
            }
            FixtureError::Parse(e) => write!(f, "invalid fixture GeoJSON: {}", e),
            FixtureError::EmptyGeometry(id) => {
                write!(f, "feature '{}' has no polygon ring or coordinates", id)
            }
            FixtureError::DuplicateId(id) => write!(f, "duplicate feature id '{}'", id),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Io(_, e) => Some(e),
            FixtureError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
