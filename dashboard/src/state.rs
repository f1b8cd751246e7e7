use airwatch::agent::AgentAction;
use airwatch::fixtures::Feature;
use airwatch::palette::LayerKind;

/// UI state owned by the top-level dashboard view.
///
/// Child views receive read access and report changes through these
/// methods; there is no other shared state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    active_layers: Vec<LayerKind>,
    selected_feature: Option<Feature>,
    agent_modal_open: bool,
    agent_action: AgentAction,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_layers: Vec::new(),
            selected_feature: None,
            agent_modal_open: false,
            agent_action: AgentAction::Predict,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active layers in the order they were switched on; the first drives
    /// map coloring.
    pub fn active_layers(&self) -> &[LayerKind] {
        &self.active_layers
    }

    pub fn is_layer_active(&self, layer: LayerKind) -> bool {
        self.active_layers.contains(&layer)
    }

    /// Switch a layer on (appended last) or off.
    pub fn toggle_layer(&mut self, layer: LayerKind) {
        if self.is_layer_active(layer) {
            self.active_layers.retain(|l| *l != layer);
        } else {
            self.active_layers.push(layer);
        }
    }

    pub fn select_feature(&mut self, feature: Feature) {
        self.selected_feature = Some(feature);
    }

    pub fn selected_feature(&self) -> Option<&Feature> {
        self.selected_feature.as_ref()
    }

    pub fn selected_feature_id(&self) -> Option<&str> {
        self.selected_feature.as_ref().map(|f| f.id.as_str())
    }

    /// Name shown in the controls panel.
    pub fn selected_region(&self) -> Option<&str> {
        self.selected_feature
            .as_ref()
            .map(|f| f.properties.name.as_str())
    }

    pub fn open_agent(&mut self, action: AgentAction) {
        self.agent_action = action;
        self.agent_modal_open = true;
    }

    pub fn close_agent(&mut self) {
        self.agent_modal_open = false;
    }

    pub fn agent_modal_open(&self) -> bool {
        self.agent_modal_open
    }

    pub fn agent_action(&self) -> AgentAction {
        self.agent_action
    }
}
