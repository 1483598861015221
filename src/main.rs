//! Neo4j Memory Bridge - Binary Entry Point
//!
//! Loads `.env`, parses settings, connects the store once and serves MCP
//! over the configured transport. Any startup failure exits non-zero.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use neo4j_memory_bridge::config::{Listener, Settings, Transport, TLS_DEFAULT_PORT};
use neo4j_memory_bridge::error::BridgeError;
use neo4j_memory_bridge::server::{http, stdio, McpServer};
use neo4j_memory_bridge::tools::ToolRegistry;
use neo4j_memory_bridge::{logging, store};

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let settings = Settings::parse();

    if let Err(e) = logging::init(&settings.log_level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to start server");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), BridgeError> {
    let graph_store = store::open(&settings).await?;
    info!(backend = graph_store.backend(), "graph store ready");

    let server = Arc::new(McpServer::new(ToolRegistry::with_store(graph_store)));

    if settings.transport == Transport::Stdio {
        return stdio::serve(server).await;
    }

    let listener = settings.listener()?;
    let mount = settings.mount_path();
    match &listener {
        Listener::Tls { files, .. } => info!(
            cert = %files.cert.display(),
            key = %files.key.display(),
            "TLS enabled"
        ),
        Listener::Plain(addr) => {
            if settings.http_port == TLS_DEFAULT_PORT && addr.port() != TLS_DEFAULT_PORT {
                warn!(port = addr.port(), "SSL certificates not found, falling back to plain HTTP");
            }
        }
    }
    info!(
        transport = ?settings.transport,
        url = %format!("{}://{}{}", listener.scheme(), listener.addr(), mount),
        "starting MCP server"
    );

    let router = http::create_router(server, settings.transport, &mount);
    http::serve(router, listener).await?;
    info!("server stopped");
    Ok(())
}
