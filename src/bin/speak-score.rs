//! speak-score -- MCP server exposing pronunciation scoring tools.
//!
//! Usage: speak-score [--config <path>]

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args().skip_while(|a| a != "--config").nth(1);

    let scoring = match config_path {
        Some(path) => speak_score::ScoringConfig::load(std::path::Path::new(&path))
            .with_context(|| format!("failed to load scoring config from {path}"))?,
        None => speak_score::ScoringConfig::default(),
    };

    speak_score::run_mcp_server(speak_score::server::McpServerConfig { scoring })
}
