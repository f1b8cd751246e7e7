use super::AgentError;
use rand::{Rng, RngCore};

/// Source of uniform samples in `[0, 1)`.
///
/// Any `rand` generator works; tests use [`ScriptedRandom`] to pin outputs.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Rejects an empty sequence or any sample outside `[0, 1)`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self, AgentError> {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Err(AgentError::InvalidRequest(
                "scripted sequence must not be empty".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(AgentError::InvalidRequest(format!(
                "scripted sample {} outside [0, 1)",
                bad
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    pub fn constant(value: f64) -> Result<Self, AgentError> {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
