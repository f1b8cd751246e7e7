// Map view model: polygon styling, hover, click, popups and legend.
//
// The mapping library itself is external; this module decides what it draws.

mod assets;

pub use assets::{AssetHost, AssetKind, MapAsset, ScopedAssets, LEAFLET_ASSETS};

use airwatch::fixtures::Feature;
use airwatch::palette::{
    color_for_value, opacity_for_layers, ColorScale, LayerKind, Rgb, Thresholds,
};

/// Fill used when no layer is active.
pub const NEUTRAL_FILL: Rgb = Rgb(100, 116, 139);
pub const NEUTRAL_FILL_OPACITY: f64 = 0.3;
pub const SELECTED_STROKE: Rgb = Rgb(59, 130, 246);
pub const DEFAULT_STROKE: Rgb = Rgb(71, 85, 105);

const HOVER_WEIGHT: u8 = 2;
const HOVER_FILL_OPACITY: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStyle {
    pub fill_color: Rgb,
    pub fill_opacity: f64,
    pub stroke_color: Rgb,
    pub weight: u8,
}

/// Style for one polygon given the active layers and current selection.
pub fn style_for(
    feature: &Feature,
    active_layers: &[LayerKind],
    selected_id: Option<&str>,
) -> FeatureStyle {
    let selected = selected_id == Some(feature.id.as_str());
    let (stroke_color, weight) = if selected {
        (SELECTED_STROKE, 3)
    } else {
        (DEFAULT_STROKE, 1)
    };

    let (fill_color, fill_opacity) = match active_layers.first() {
        None => (NEUTRAL_FILL, NEUTRAL_FILL_OPACITY),
        Some(primary) => (
            color_for_value(*primary, primary.property_value(&feature.properties)),
            opacity_for_layers(active_layers.len()),
        ),
    };

    FeatureStyle {
        fill_color,
        fill_opacity,
        stroke_color,
        weight,
    }
}

/// One row of a feature popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub rows: Vec<PopupRow>,
}

pub fn popup(feature: &Feature) -> Popup {
    let p = &feature.properties;
    let row = |label, value: String| PopupRow { label, value };
    Popup {
        title: p.name.clone(),
        rows: vec![
            row("Country", p.country.clone()),
            row("CO₂", format!("{} ppm", p.co2)),
            row("PM2.5", format!("{} µg/m³", p.pm25)),
            row("Ozone", p.ozone.to_string()),
            row("Pollution Index", p.air_pollution_index.to_string()),
        ],
    }
}

/// Legend for the primary layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub layer: LayerKind,
    pub thresholds: Thresholds,
    pub colors: ColorScale,
}

impl Legend {
    /// Swatches in display order.
    pub fn entries(&self) -> [(&'static str, Rgb); 3] {
        [
            ("Low", self.colors.low),
            ("Medium", self.colors.mid),
            ("High", self.colors.high),
        ]
    }
}

/// Interactive polygon layer over the fixture features.
#[derive(Debug, Clone)]
pub struct MapView {
    features: Vec<Feature>,
    active_layers: Vec<LayerKind>,
    selected_id: Option<String>,
    hovered_id: Option<String>,
}

impl MapView {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            active_layers: Vec::new(),
            selected_id: None,
            hovered_id: None,
        }
    }

    /// Refresh the inputs owned by the parent view.
    pub fn sync(&mut self, active_layers: &[LayerKind], selected_id: Option<&str>) {
        self.active_layers = active_layers.to_vec();
        self.selected_id = selected_id.map(str::to_string);
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Computed style without hover effects.
    pub fn base_style(&self, id: &str) -> Option<FeatureStyle> {
        self.feature(id)
            .map(|f| style_for(f, &self.active_layers, self.selected_id.as_deref()))
    }

    /// Style currently drawn, including hover emphasis.
    pub fn style(&self, id: &str) -> Option<FeatureStyle> {
        let mut style = self.base_style(id)?;
        if self.hovered_id.as_deref() == Some(id) {
            style.weight = HOVER_WEIGHT;
            style.fill_opacity = HOVER_FILL_OPACITY;
        }
        Some(style)
    }

    /// Styles for every feature, in dataset order.
    pub fn styles(&self) -> Vec<(&str, FeatureStyle)> {
        self.features
            .iter()
            .filter_map(|f| self.style(&f.id).map(|s| (f.id.as_str(), s)))
            .collect()
    }

    /// Pointer entered a polygon. Returns the emphasized style.
    pub fn hover(&mut self, id: &str) -> Option<FeatureStyle> {
        self.feature(id)?;
        self.hovered_id = Some(id.to_string());
        self.style(id)
    }

    /// Pointer left the hovered polygon. Returns its restored style.
    pub fn unhover(&mut self) -> Option<FeatureStyle> {
        let id = self.hovered_id.take()?;
        self.base_style(&id)
    }

    /// Feature to hand to the selection callback.
    pub fn click(&self, id: &str) -> Option<&Feature> {
        self.feature(id)
    }

    pub fn popup(&self, id: &str) -> Option<Popup> {
        self.feature(id).map(popup)
    }

    /// Shown only while at least one layer is active.
    pub fn legend(&self) -> Option<Legend> {
        let layer = *self.active_layers.first()?;
        Some(Legend {
            title: format!("Active Layer: {}", layer.id().to_uppercase()),
            layer,
            thresholds: layer.thresholds(),
            colors: layer.colors(),
        })
    }
}
