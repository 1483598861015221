//! Newline-delimited JSON-RPC over stdin/stdout

use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use super::McpServer;
use crate::error::BridgeError;

/// Serve requests from stdin until it closes
pub async fn serve(server: Arc<McpServer>) -> Result<(), BridgeError> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    info!(tools = server.tool_count(), "serving MCP over stdio");

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(response) = server.handle_message(trimmed).await {
            let mut out = response.to_string();
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed");
    Ok(())
}
