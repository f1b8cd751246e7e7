use super::protocol::{AgentAction, AgentRequest, AgentResponse};
use super::random::RandomSource;
use super::{synth, AgentError};
use crate::fixtures::FixtureStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Delay applied to every call to mimic a long-running analytic job.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(800);

/// Simulated ML agent.
///
/// Calls are independent: concurrent requests are neither de-duplicated nor
/// cancelled. The random source is locked only for the synchronous synthesis
/// step, never across the simulated delay.
pub struct AgentService {
    store: Arc<FixtureStore>,
    latency: Duration,
    rng: Mutex<Box<dyn RandomSource + Send>>,
}

impl AgentService {
    /// Service backed by an entropy-seeded generator.
    pub fn new(store: Arc<FixtureStore>, latency: Duration) -> Self {
        Self::with_random(store, latency, StdRng::from_entropy())
    }

    /// Service with an injected random source (deterministic tests, replays).
    pub fn with_random(
        store: Arc<FixtureStore>,
        latency: Duration,
        rng: impl RandomSource + Send + 'static,
    ) -> Self {
        Self {
            store,
            latency,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn store(&self) -> &Arc<FixtureStore> {
        &self.store
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Run a typed request.
    pub async fn handle(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        self.simulate_latency().await;
        self.dispatch(request)
    }

    /// Run a raw JSON body.
    ///
    /// Malformed JSON is rejected immediately. Otherwise the delay is applied
    /// before the action is checked, so invalid actions are as slow as valid
    /// ones.
    pub async fn handle_json(&self, body: &[u8]) -> Result<AgentResponse, AgentError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| AgentError::InvalidRequest(e.to_string()))?;

        self.simulate_latency().await;

        let request = AgentRequest::from_value(value)?;
        self.dispatch(&request)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn dispatch(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        let request_id = Uuid::now_v7();
        info!(
            request_id = %request_id,
            action = %request.action,
            layers = ?request.layers,
            selected = request.context.selected_feature_ids.len(),
            "Running agent action"
        );

        let mut rng = self.rng.lock().map_err(|_| {
            error!(request_id = %request_id, "Random source lock poisoned");
            AgentError::Internal("random source unavailable".to_string())
        })?;

        let result = match request.action {
            AgentAction::Predict => request
                .bbox()
                .and_then(|bbox| synth::predict(&self.store, bbox, &mut **rng)),
            AgentAction::Cluster => Ok(synth::cluster(&self.store, &mut **rng)),
        };

        match &result {
            Ok(response) => {
                debug!(request_id = %request_id, text = %response.text(), "Agent action complete")
            }
            Err(e) => error!(request_id = %request_id, error = %e, "Agent action failed"),
        }

        result
    }
}
