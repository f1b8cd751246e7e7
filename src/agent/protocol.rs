use super::AgentError;
use crate::fixtures::{BBox, Position};
use crate::palette::LayerKind;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Number of points in a predicted trend series.
pub const TREND_LEN: usize = 5;

/// X-axis labels for the trend chart.
pub const TREND_YEARS: [&str; TREND_LEN] = ["2019", "2020", "2021", "2022", "2023"];

/// Cluster buckets, in bucket-index order.
pub const CLUSTER_LABELS: [&str; 3] = ["Low Pollution", "Moderate", "High Risk"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentAction {
    Predict,
    Cluster,
}

impl AgentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentAction::Predict => "predict",
            AgentAction::Cluster => "cluster",
        }
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "predict" => Ok(AgentAction::Predict),
            "cluster" => Ok(AgentAction::Cluster),
            other => Err(AgentError::InvalidAction(other.to_string())),
        }
    }
}

/// Body of `POST /api/mock/agent`.
///
/// `location` may be omitted for `cluster`, which never reads it. Layer ids
/// this build does not know are dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub action: AgentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "known_layers")]
    pub layers: Vec<LayerKind>,
    #[serde(default)]
    pub context: RequestContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub bbox: BBox,
    pub center: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(rename = "selectedFeatureIds", default)]
    pub selected_feature_ids: Vec<String>,
}

impl AgentRequest {
    /// Decode an already-parsed JSON body.
    ///
    /// The action tag is checked before the rest of the shape, so an unknown
    /// (or missing) action is reported as such even when other fields are off.
    pub fn from_value(value: Value) -> Result<Self, AgentError> {
        let action = value.get("action").and_then(Value::as_str).unwrap_or_default();
        action.parse::<AgentAction>()?;

        serde_json::from_value(value).map_err(|e| AgentError::InvalidRequest(e.to_string()))
    }

    /// Region to predict over.
    pub fn bbox(&self) -> Result<&BBox, AgentError> {
        self.location
            .as_ref()
            .map(|location| &location.bbox)
            .ok_or_else(|| {
                AgentError::InvalidRequest(format!("{} requires a location", self.action))
            })
    }
}

fn known_layers<'de, D>(deserializer: D) -> Result<Vec<LayerKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    Ok(ids.iter().filter_map(|id| LayerKind::from_id(id)).collect())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
}

/// Agent result, tagged on `action`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AgentResponse {
    Predict(PredictResponse),
    Cluster(ClusterResponse),
}

impl AgentResponse {
    pub fn action(&self) -> AgentAction {
        match self {
            AgentResponse::Predict(_) => AgentAction::Predict,
            AgentResponse::Cluster(_) => AgentAction::Cluster,
        }
    }

    /// Human-readable summary shown in the chat transcript.
    pub fn text(&self) -> &str {
        match self {
            AgentResponse::Predict(r) => &r.text,
            AgentResponse::Cluster(r) => &r.text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub status: ResponseStatus,
    pub text: String,
    pub payload: PredictPayload,
    #[serde(rename = "chartData")]
    pub chart_data: TrendChart,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictPayload {
    pub predicted_co2_ppm: f64,
    pub trend: [f64; TREND_LEN],
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub x: [String; TREND_LEN],
    pub y: [f64; TREND_LEN],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterResponse {
    pub status: ResponseStatus,
    pub text: String,
    pub payload: ClusterPayload,
    #[serde(rename = "chartData")]
    pub chart_data: ClusterChart,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterPayload {
    pub clusters: [Cluster; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: u8,
    pub label: String,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterChart {
    #[serde(rename = "clustersCount")]
    pub clusters_count: [usize; 3],
}
