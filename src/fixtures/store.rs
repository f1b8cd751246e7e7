use super::{BBox, CollectionKind, Feature, FeatureCollection, FixtureError};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const EMBEDDED_DATASET: &str = include_str!("../../data/mock_air_data.json");

/// Read-only collection of sample features.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards, so readers need no locking.
#[derive(Debug)]
pub struct FixtureStore {
    features: Vec<Feature>,
}

impl FixtureStore {
    /// Dataset compiled into the binary.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Load a FeatureCollection from a GeoJSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Io(path.display().to_string(), e))?;
        let store = Self::from_json(&contents)?;
        info!(path = %path.display(), features = store.len(), "Loaded fixture dataset");
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let collection: FeatureCollection =
            serde_json::from_str(json).map_err(FixtureError::Parse)?;
        Self::from_collection(collection)
    }

    /// Validate and wrap an in-memory collection.
    ///
    /// Every feature needs at least one ring with one position, and ids must
    /// be unique.
    pub fn from_collection(collection: FeatureCollection) -> Result<Self, FixtureError> {
        let mut seen = HashSet::new();
        for feature in &collection.features {
            if feature.anchor().is_none() {
                return Err(FixtureError::EmptyGeometry(feature.id.clone()));
            }
            if !seen.insert(feature.id.as_str()) {
                return Err(FixtureError::DuplicateId(feature.id.clone()));
            }
        }

        Ok(Self {
            features: collection.features,
        })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Features whose anchor position lies inside `bbox`.
    pub fn within_bbox(&self, bbox: &BBox) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| f.anchor().map_or(false, |p| bbox.contains(p)))
            .collect()
    }

    /// Distinct country names in first-seen order.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.features
            .iter()
            .map(|f| f.properties.country.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Owned copy for serving to the map view.
    pub fn collection(&self) -> FeatureCollection {
        FeatureCollection {
            kind: CollectionKind::FeatureCollection,
            features: self.features.clone(),
        }
    }
}
