//! Airwatch dashboard - client-side logic for the air-quality map.
//!
//! Everything a browser front end needs apart from the widgets themselves:
//!
//! ```text
//!   controls (layers, action) ──► DashboardState
//!                                      │
//!          ┌───────────────────────────┴───────────────┐
//!          ▼                                           ▼
//!     MapView (styles, hover,                  ChatSession (transcript,
//!     popup, legend, assets)                   loading flag, charts)
//!                                                      │
//!                                                      ▼
//!                                   AgentGateway ──► POST /api/mock/agent
//! ```
//!
//! # Core Types
//!
//! - [`DashboardState`] - Layer selection, selected feature and modal state
//! - [`MapView`] - Polygon styling and interaction for the fixture layer
//! - [`ChatSession`] - Agent conversation and chart data
//! - [`AgentGateway`] - Boundary to the agent, over HTTP ([`AgentClient`]) or
//!   in-process ([`LocalGateway`])

pub mod chat;
pub mod gateway;
pub mod map_view;
pub mod state;

pub use chat::{ChatMessage, ChatSession, MessageRole};
pub use gateway::{AgentClient, AgentGateway, LocalGateway};
pub use map_view::{FeatureStyle, MapView};
pub use state::DashboardState;
