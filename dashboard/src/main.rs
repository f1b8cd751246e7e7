use airwatch::agent::AgentAction;
use airwatch::palette::LayerKind;
use anyhow::{Context, Result};
use dashboard::chat::{ChartView, ChatSession, MessageRole};
use dashboard::{AgentClient, DashboardState, MapView};
use tracing::info;

/// Drives one agent action against a running airwatch server and prints the
/// transcript.
///
/// Environment:
/// - `AIRWATCH_API_URL` (default `http://localhost:3000`)
/// - `DASHBOARD_ACTION`: `predict` or `cluster` (default `predict`)
/// - `DASHBOARD_LAYERS`: comma-separated layer ids (default `co2`)
/// - `DASHBOARD_FEATURE`: feature id to select (optional)
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info".into()),
        )
        .init();

    let api_url = std::env::var("AIRWATCH_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let action: AgentAction = std::env::var("DASHBOARD_ACTION")
        .unwrap_or_else(|_| "predict".to_string())
        .parse()
        .context("DASHBOARD_ACTION must be 'predict' or 'cluster'")?;

    let layers: Vec<LayerKind> = std::env::var("DASHBOARD_LAYERS")
        .unwrap_or_else(|_| "co2".to_string())
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            serde_json::from_value(serde_json::Value::String(s.to_string()))
                .with_context(|| format!("Unknown layer '{}'", s))
        })
        .collect::<Result<_>>()?;

    let selected_id = std::env::var("DASHBOARD_FEATURE").ok();

    info!(
        api_url = %api_url,
        action = %action,
        layers = ?layers,
        feature = ?selected_id,
        "Configuration loaded"
    );

    let client = AgentClient::new(api_url)?;
    let fixtures = client.fetch_fixtures().await?;
    info!(features = fixtures.features.len(), "Fixtures loaded");

    let mut state = DashboardState::new();
    let mut map = MapView::new(fixtures.features);
    for layer in layers {
        state.toggle_layer(layer);
    }

    if let Some(id) = &selected_id {
        let feature = map
            .click(id)
            .cloned()
            .with_context(|| format!("No feature with id '{}'", id))?;
        state.select_feature(feature);
    }
    map.sync(state.active_layers(), state.selected_feature_id());

    if let Some(region) = state.selected_region() {
        println!("Selected: {}", region);
    }
    if let Some(legend) = map.legend() {
        let swatches: Vec<String> = legend
            .entries()
            .iter()
            .map(|(label, color)| format!("{} {}", label, color))
            .collect();
        println!("{} [{}]", legend.title, swatches.join(", "));
    }

    state.open_agent(action);
    let mut session = ChatSession::new();
    session.open(state.agent_action());
    session
        .run(&client, state.active_layers(), state.selected_feature())
        .await;

    for message in session.messages() {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::Assistant => "assistant",
        };
        println!("[{}] {}", role, message.content);

        match message.chart() {
            Some(ChartView::Line(chart)) => {
                for point in &chart.points {
                    println!("  {} {:>7.1} ppm", point.label, point.value);
                }
                println!("  confidence {}%", chart.confidence_pct);
            }
            Some(ChartView::Bars(chart)) => {
                for bar in &chart.bars {
                    println!(
                        "  {:<14} {:>2} regions: {}",
                        bar.label,
                        bar.count,
                        bar.members.join(", ")
                    );
                }
            }
            None => {}
        }
    }

    state.close_agent();
    session.close();
    Ok(())
}
