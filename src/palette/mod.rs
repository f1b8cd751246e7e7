// Layer identifiers and the color/opacity mapping used by the map view.

use crate::fixtures::FeatureProperties;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Selectable pollution metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Co2,
    Ghg,
    AirPollution,
    Pm25,
    Ozone,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Co2,
        LayerKind::Ghg,
        LayerKind::AirPollution,
        LayerKind::Pm25,
        LayerKind::Ozone,
    ];

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            LayerKind::Co2 => "co2",
            LayerKind::Ghg => "ghg",
            LayerKind::AirPollution => "air_pollution",
            LayerKind::Pm25 => "pm25",
            LayerKind::Ozone => "ozone",
        }
    }

    /// Layer for a wire id; `None` for ids this build does not know.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Co2 => "CO₂",
            LayerKind::Ghg => "Greenhouse Gas",
            LayerKind::AirPollution => "Air Pollution",
            LayerKind::Pm25 => "Particulate Matter",
            LayerKind::Ozone => "Ozone Pollution",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LayerKind::Co2 => "Carbon dioxide levels",
            LayerKind::Ghg => "Total GHG emissions",
            LayerKind::AirPollution => "Overall air quality index",
            LayerKind::Pm25 => "PM2.5 concentration",
            LayerKind::Ozone => "Ground-level ozone",
        }
    }

    /// Property that drives coloring for this layer.
    pub fn property_value(&self, props: &FeatureProperties) -> f64 {
        match self {
            LayerKind::Co2 => props.co2,
            LayerKind::Ghg => props.ghg,
            LayerKind::AirPollution => props.air_pollution_index,
            LayerKind::Pm25 => props.pm25,
            LayerKind::Ozone => props.ozone,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        match self {
            LayerKind::Co2 => Thresholds {
                low: 405.0,
                high: 415.0,
            },
            LayerKind::Ghg => Thresholds {
                low: 0.9,
                high: 1.3,
            },
            LayerKind::AirPollution => Thresholds {
                low: 50.0,
                high: 150.0,
            },
            LayerKind::Pm25 => Thresholds {
                low: 15.0,
                high: 50.0,
            },
            LayerKind::Ozone => Thresholds {
                low: 0.03,
                high: 0.045,
            },
        }
    }

    /// Every layer currently shares the green/yellow/red scale.
    pub fn colors(&self) -> ColorScale {
        ColorScale {
            low: GREEN,
            mid: YELLOW,
            high: RED,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// CSS `rgb(r, g, b)` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const GREEN: Rgb = Rgb(34, 197, 94);
pub const YELLOW: Rgb = Rgb(234, 179, 8);
pub const RED: Rgb = Rgb(239, 68, 68);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    pub low: Rgb,
    pub mid: Rgb,
    pub high: Rgb,
}

/// Three-step color lookup: `<= low` is low, `>= high` is high, anything
/// between is mid. No interpolation.
pub fn color_for_value(layer: LayerKind, value: f64) -> Rgb {
    let threshold = layer.thresholds();
    let colors = layer.colors();

    if value <= threshold.low {
        colors.low
    } else if value >= threshold.high {
        colors.high
    } else {
        colors.mid
    }
}

/// Fill opacity when `active_layers` layers are drawn at once, floored at 0.3.
///
/// Zero is treated as a single layer.
pub fn opacity_for_layers(active_layers: usize) -> f64 {
    let count = active_layers.max(1) as f64;
    (0.7 / count).max(0.3)
}
