// Response synthesis for the simulated agent.
//
// Nothing here is a model: predictions are a regional mean plus jitter and
// clusters are a per-country random draw.

use super::protocol::{
    AgentResponse, Cluster, ClusterChart, ClusterPayload, ClusterResponse, PredictPayload,
    PredictResponse, ResponseStatus, TrendChart, CLUSTER_LABELS, TREND_LEN, TREND_YEARS,
};
use super::random::RandomSource;
use super::AgentError;
use crate::fixtures::{BBox, FixtureStore};

/// CO₂ level (ppm) used when no fixture falls inside the region.
pub const BASELINE_CO2_PPM: f64 = 410.0;

/// Pre-jitter input to a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalBaseline {
    pub sample_count: usize,
    pub mean_co2: f64,
}

/// Mean `co2` over the fixtures anchored inside `bbox`, or
/// [`BASELINE_CO2_PPM`] when there are none.
pub fn regional_baseline(store: &FixtureStore, bbox: &BBox) -> RegionalBaseline {
    let selected = store.within_bbox(bbox);
    let mean_co2 = if selected.is_empty() {
        BASELINE_CO2_PPM
    } else {
        selected.iter().map(|f| f.properties.co2).sum::<f64>() / selected.len() as f64
    };

    RegionalBaseline {
        sample_count: selected.len(),
        mean_co2,
    }
}

/// Synthesize a CO₂ prediction for `bbox`.
///
/// Samples are drawn in a fixed order: the jitter, one per trend point, then
/// the confidence.
pub fn predict<R: RandomSource + ?Sized>(
    store: &FixtureStore,
    bbox: &BBox,
    rng: &mut R,
) -> Result<AgentResponse, AgentError> {
    let baseline = regional_baseline(store, bbox);

    let delta = (rng.next_unit() - 0.5) * 8.0;
    let predicted = round_to(baseline.mean_co2 + delta, 1);

    let mut trend = [0.0; TREND_LEN];
    for (i, point) in trend.iter_mut().enumerate() {
        *point = round_to(predicted - 7.0 + i as f64 * 1.8 + rng.next_unit() * 2.0, 1);
    }

    let confidence = round_to(0.6 + rng.next_unit() * 0.3, 2);

    if !predicted.is_finite() || trend.iter().any(|v| !v.is_finite()) {
        return Err(AgentError::Internal(format!(
            "non-finite prediction from {} samples",
            baseline.sample_count
        )));
    }

    let sign = if delta > 0.0 { "+" } else { "" };
    let text = format!(
        "Predicted average CO₂ level in selected region: {} ppm ({}{} ppm vs baseline). Confidence: {}.",
        predicted,
        sign,
        round_to(delta, 1),
        confidence
    );

    Ok(AgentResponse::Predict(PredictResponse {
        status: ResponseStatus::Ok,
        text,
        payload: PredictPayload {
            predicted_co2_ppm: predicted,
            trend,
            confidence,
        },
        chart_data: TrendChart {
            x: TREND_YEARS.map(|year| year.to_string()),
            y: trend,
        },
    }))
}

/// Randomly partition every fixture country into the three cluster buckets.
///
/// Region and layer selection do not influence the result.
pub fn cluster<R: RandomSource + ?Sized>(store: &FixtureStore, rng: &mut R) -> AgentResponse {
    let mut buckets: [Vec<String>; 3] = Default::default();

    for country in store.countries() {
        let idx = ((rng.next_unit() * 3.0).floor() as usize).min(2);
        buckets[idx].push(country.to_string());
    }

    let clusters_count = [buckets[0].len(), buckets[1].len(), buckets[2].len()];
    let text = format!(
        "Found 3 clusters based on air quality indicators: {} regions with low pollution, {} with moderate levels, and {} at high risk.",
        clusters_count[0], clusters_count[1], clusters_count[2]
    );

    let mut next_id = 0u8;
    let clusters = buckets.map(|members| {
        let cluster_id = next_id;
        next_id += 1;
        Cluster {
            cluster_id,
            label: CLUSTER_LABELS[cluster_id as usize].to_string(),
            members,
        }
    });

    AgentResponse::Cluster(ClusterResponse {
        status: ResponseStatus::Ok,
        text,
        payload: ClusterPayload { clusters },
        chart_data: ClusterChart { clusters_count },
    })
}

/// Round to `places` decimals with ties going toward positive infinity
/// (`-0.25` becomes `-0.2`). Never yields `-0`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor + 0.0
}
