use crate::gateway::AgentGateway;
use airwatch::agent::{AgentAction, AgentRequest, AgentResponse, Location, RequestContext};
use airwatch::fixtures::{BBox, Feature};
use airwatch::palette::LayerKind;
use tracing::{error, info};

mod charts;

pub use charts::{Bar, BarChart, ChartView, LineChart, LinePoint};

/// Degrees around the selected feature's anchor that form the request bbox.
pub const SELECTION_RADIUS_DEG: f64 = 5.0;

pub const ERROR_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub response: Option<AgentResponse>,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: MessageRole::System,
            content: content.to_string(),
            response: None,
        }
    }

    /// Chart for an attached agent response.
    pub fn chart(&self) -> Option<ChartView> {
        self.response.as_ref().map(ChartView::from_response)
    }
}

/// Prompt that opens the transcript for `action`.
pub fn system_prompt(action: AgentAction) -> &'static str {
    match action {
        AgentAction::Predict => "Predict CO₂ level for the selected region and active layers.",
        AgentAction::Cluster => {
            "Cluster countries by chosen air-quality signals near this location."
        }
    }
}

/// Build the agent request for the current selection.
///
/// With a selected feature the region is a square around its anchor;
/// otherwise the whole world.
pub fn build_request(
    action: AgentAction,
    layers: &[LayerKind],
    selected: Option<&Feature>,
) -> AgentRequest {
    let anchor = selected.and_then(Feature::anchor);
    let (bbox, center) = match anchor {
        Some(anchor) => (BBox::around(anchor, SELECTION_RADIUS_DEG), anchor),
        None => (BBox::WORLD, [0.0, 0.0]),
    };

    AgentRequest {
        action,
        location: Some(Location { bbox, center }),
        layers: layers.to_vec(),
        context: RequestContext {
            selected_feature_ids: selected.map(|f| vec![f.id.clone()]).unwrap_or_default(),
        },
    }
}

/// Conversation shown in the agent modal.
#[derive(Debug, Default)]
pub struct ChatSession {
    action: Option<AgentAction>,
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh transcript for `action`.
    pub fn open(&mut self, action: AgentAction) {
        self.action = Some(action);
        self.messages = vec![ChatMessage::system(system_prompt(action))];
    }

    pub fn close(&mut self) {
        self.action = None;
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn action(&self) -> Option<AgentAction> {
        self.action
    }

    /// Call the agent and append its reply.
    ///
    /// Does nothing when the session is closed or a call is already in
    /// flight. Failures become an apology message; nothing is retried.
    /// Returns whether a call was made.
    pub async fn run<G: AgentGateway + ?Sized>(
        &mut self,
        gateway: &G,
        layers: &[LayerKind],
        selected: Option<&Feature>,
    ) -> bool {
        let Some(action) = self.action else {
            return false;
        };
        if self.loading {
            return false;
        }

        self.loading = true;
        let request = build_request(action, layers, selected);
        info!(action = %action, layers = ?layers, "Calling ML agent");

        let message = match gateway.call(&request).await {
            Ok(response) => ChatMessage {
                role: MessageRole::Assistant,
                content: response.text().to_string(),
                response: Some(response),
            },
            Err(e) => {
                error!(error = %e, "ML agent error");
                ChatMessage {
                    role: MessageRole::Assistant,
                    content: ERROR_REPLY.to_string(),
                    response: None,
                }
            }
        };
        self.messages.push(message);
        self.loading = false;
        true
    }
}
