use airwatch::agent::{AgentResponse, ClusterResponse, PredictResponse};

/// Chart attached to an agent reply, in percent-of-plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Line(LineChart),
    Bars(BarChart),
}

impl ChartView {
    pub fn from_response(response: &AgentResponse) -> Self {
        match response {
            AgentResponse::Predict(p) => ChartView::Line(LineChart::from_prediction(p)),
            AgentResponse::Cluster(c) => ChartView::Bars(BarChart::from_clusters(c)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub value: f64,
    /// 0 at the left edge, 100 at the right
    pub x_pct: f64,
    /// 0 at the top (maximum), 100 at the bottom (minimum)
    pub y_pct: f64,
}

/// CO₂ trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: &'static str,
    pub points: Vec<LinePoint>,
    pub confidence_pct: u32,
}

impl LineChart {
    pub fn from_prediction(p: &PredictResponse) -> Self {
        let values = &p.chart_data.y;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let last = (values.len().max(2) - 1) as f64;

        let points = p
            .chart_data
            .x
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(i, (label, &value))| LinePoint {
                label: label.clone(),
                value,
                x_pct: i as f64 / last * 100.0,
                // Flat series sit mid-plot
                y_pct: if range > 0.0 {
                    100.0 - (value - min) / range * 100.0
                } else {
                    50.0
                },
            })
            .collect();

        Self {
            title: "CO₂ Trend Analysis",
            points,
            confidence_pct: (p.payload.confidence * 100.0).round() as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    pub width_pct: f64,
    pub members: Vec<String>,
}

/// Cluster distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_clusters(c: &ClusterResponse) -> Self {
        let max = c
            .payload
            .clusters
            .iter()
            .map(|cluster| cluster.members.len())
            .max()
            .unwrap_or(0);

        let bars = c
            .payload
            .clusters
            .iter()
            .map(|cluster| Bar {
                label: cluster.label.clone(),
                count: cluster.members.len(),
                width_pct: if max == 0 {
                    0.0
                } else {
                    cluster.members.len() as f64 / max as f64 * 100.0
                },
                members: cluster.members.clone(),
            })
            .collect();

        Self {
            title: "Cluster Distribution",
            bars,
        }
    }
}
