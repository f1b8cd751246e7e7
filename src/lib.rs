// Fixture store (read-only GeoJSON sample data)
pub mod fixtures;

// Layer thresholds, colors and opacity
pub mod palette;

// Simulated ML agent (predict / cluster)
pub mod agent;

// HTTP APIs
pub mod api;

// Configuration
pub mod config;

pub use agent::{AgentAction, AgentRequest, AgentResponse, AgentService};
pub use fixtures::{BBox, Feature, FeatureCollection, FixtureStore};
pub use palette::LayerKind;
