use std::fmt;

mod protocol;
mod random;
mod service;
mod synth;
#[cfg(test)]
mod tests;

pub use protocol::{
    AgentAction, AgentRequest, AgentResponse, Cluster, ClusterChart, ClusterPayload,
    ClusterResponse, Location, PredictPayload, PredictResponse, RequestContext, ResponseStatus,
    TrendChart, CLUSTER_LABELS, TREND_LEN, TREND_YEARS,
};
pub use random::{RandomSource, ScriptedRandom};
pub use service::{AgentService, DEFAULT_SIMULATED_LATENCY};
pub use synth::{cluster, predict, regional_baseline, RegionalBaseline, BASELINE_CO2_PPM};

/// Agent failures
#[derive(Debug, Clone, PartialEq)]
pub enum AgentError {
    /// Action tag other than `predict` / `cluster`
    InvalidAction(String),
    /// Body is not JSON or does not match the request shape
    InvalidRequest(String),
    Internal(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::InvalidAction(a) => write!(f, "invalid action '{}'", a),
            AgentError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            AgentError::Internal(msg) => write!(f, "internal agent failure: {}", msg),
        }
    }
}

impl std::error::Error for AgentError {}
