//! Runtime configuration
//!
//! Every setting can come from a command-line flag or an environment
//! variable (a `.env` file is loaded before parsing). Transport and TLS are
//! resolved into enumerated options here so startup has a single path.

use std::fs::File;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::error::BridgeError;

/// Port used by default when TLS is expected
pub const TLS_DEFAULT_PORT: u16 = 443;

/// Port used instead of [`TLS_DEFAULT_PORT`] when TLS cannot be enabled
pub const PLAINTEXT_FALLBACK_PORT: u16 = 8000;

/// How MCP messages reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// Event stream plus a per-session message endpoint
    Sse,
    /// Single POST endpoint answering with the JSON-RPC response
    Http,
}

/// Which graph store backs the tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Neo4j,
    /// Process-local graph, lost on exit
    Memory,
}

/// Command-line and environment settings
#[derive(Debug, Clone, Parser)]
#[command(name = "memory-bridge", version, about = "Neo4j knowledge graph memory over MCP")]
pub struct Settings {
    /// Bolt URL of the Neo4j server
    #[arg(long, env = "NEO4J_URL")]
    pub neo4j_url: Option<String>,

    #[arg(long, env = "NEO4J_USERNAME", default_value = "neo4j")]
    pub neo4j_username: String,

    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,

    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,

    /// Upper bound of pooled Bolt connections
    #[arg(long, env = "NEO4J_MAX_CONNECTIONS", default_value_t = 16)]
    pub neo4j_max_connections: usize,

    #[arg(long, env = "HTTP_HOST", default_value = "0.0.0.0")]
    pub http_host: String,

    #[arg(long, env = "HTTP_PORT", default_value_t = TLS_DEFAULT_PORT)]
    pub http_port: u16,

    /// Mount point of the MCP endpoints
    #[arg(long, env = "HTTP_PATH", default_value = "/mcp")]
    pub http_path: String,

    #[arg(long, env = "SSL_CERTFILE")]
    pub ssl_certfile: Option<PathBuf>,

    #[arg(long, env = "SSL_KEYFILE")]
    pub ssl_keyfile: Option<PathBuf>,

    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Sse)]
    pub transport: Transport,

    #[arg(long = "store", env = "MCP_STORE", value_enum, default_value_t = StoreKind::Neo4j)]
    pub store: StoreKind,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Connection settings for the Neo4j store
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    pub url: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

/// Certificate and key that were both found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Resolved HTTP listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    Plain(SocketAddr),
    Tls { addr: SocketAddr, files: TlsFiles },
}

impl Listener {
    pub fn addr(&self) -> SocketAddr {
        match self {
            Listener::Plain(addr) | Listener::Tls { addr, .. } => *addr,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Listener::Plain(_) => "http",
            Listener::Tls { .. } => "https",
        }
    }
}

impl Settings {
    /// Neo4j connection settings; URL and password are required
    pub fn neo4j(&self) -> Result<Neo4jSettings, BridgeError> {
        let url = self
            .neo4j_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| BridgeError::Config("NEO4J_URL is required for the neo4j store".into()))?;
        let password = self.neo4j_password.clone().ok_or_else(|| {
            BridgeError::Config("NEO4J_PASSWORD is required for the neo4j store".into())
        })?;

        Ok(Neo4jSettings {
            url,
            username: self.neo4j_username.clone(),
            password,
            database: self.neo4j_database.clone(),
            max_connections: self.neo4j_max_connections.max(1),
        })
    }

    /// Certificate and key when both are configured and readable
    pub fn tls_files(&self) -> Option<TlsFiles> {
        let cert = self.ssl_certfile.as_deref()?;
        let key = self.ssl_keyfile.as_deref()?;
        if is_readable_file(cert) && is_readable_file(key) {
            Some(TlsFiles {
                cert: cert.to_path_buf(),
                key: key.to_path_buf(),
            })
        } else {
            None
        }
    }

    /// Resolve the HTTP listener, falling back to plaintext when TLS files
    /// are missing. The TLS default port is swapped for the fallback port.
    /// `HTTP_HOST` may be an IP address or a hostname.
    pub fn listener(&self) -> Result<Listener, BridgeError> {
        match self.tls_files() {
            Some(files) => Ok(Listener::Tls {
                addr: resolve_host(&self.http_host, self.http_port)?,
                files,
            }),
            None => {
                let port = if self.http_port == TLS_DEFAULT_PORT {
                    PLAINTEXT_FALLBACK_PORT
                } else {
                    self.http_port
                };
                Ok(Listener::Plain(resolve_host(&self.http_host, port)?))
            }
        }
    }

    /// Mount path with a leading slash and no trailing slash
    pub fn mount_path(&self) -> String {
        let trimmed = self.http_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

/// First address `host` resolves to
fn resolve_host(host: &str, port: u16) -> Result<SocketAddr, BridgeError> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| BridgeError::Config(format!("cannot resolve HTTP_HOST '{host}': {e}")))?
        .next()
        .ok_or_else(|| BridgeError::Config(format!("HTTP_HOST '{host}' has no address")))
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        let mut argv = vec!["memory-bridge"];
        argv.extend_from_slice(args);
        Settings::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_plaintext_fallback_port_without_tls() {
        let settings = parse(&["--http-host", "127.0.0.1", "--http-port", "443"]);
        let listener = settings.listener().unwrap();
        assert_eq!(listener, Listener::Plain("127.0.0.1:8000".parse().unwrap()));
        assert_eq!(listener.scheme(), "http");
    }

    #[test]
    fn test_custom_port_kept_without_tls() {
        let settings = parse(&["--http-host", "127.0.0.1", "--http-port", "9100"]);
        assert_eq!(settings.listener().unwrap().addr().port(), 9100);
    }

    #[test]
    fn test_tls_requires_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        std::fs::write(&cert, "cert").unwrap();

        let settings = parse(&[
            "--http-host",
            "127.0.0.1",
            "--http-port",
            "443",
            "--ssl-certfile",
            cert.to_str().unwrap(),
            "--ssl-keyfile",
            dir.path().join("missing.pem").to_str().unwrap(),
        ]);
        assert!(settings.tls_files().is_none());
        assert_eq!(settings.listener().unwrap().addr().port(), 8000);
    }

    #[test]
    fn test_tls_enabled_when_files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        std::fs::write(&cert, "cert").unwrap();
        std::fs::write(&key, "key").unwrap();

        let settings = parse(&[
            "--http-host",
            "127.0.0.1",
            "--http-port",
            "443",
            "--ssl-certfile",
            cert.to_str().unwrap(),
            "--ssl-keyfile",
            key.to_str().unwrap(),
        ]);
        let listener = settings.listener().unwrap();
        assert_eq!(listener.scheme(), "https");
        assert_eq!(listener.addr().port(), 443);
    }

    #[test]
    fn test_directory_is_not_a_certificate() {
        let dir = tempfile::tempdir().unwrap();
        let settings = parse(&[
            "--ssl-certfile",
            dir.path().to_str().unwrap(),
            "--ssl-keyfile",
            dir.path().to_str().unwrap(),
        ]);
        assert!(settings.tls_files().is_none());
    }

    #[test]
    fn test_invalid_host_is_config_error() {
        let settings = parse(&["--http-host", "bind.invalid"]);
        assert!(matches!(settings.listener(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_hostname_host_resolves() {
        let settings = parse(&["--http-host", "localhost", "--http-port", "9000"]);
        let addr = settings.listener().unwrap().addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn test_mount_path_normalized() {
        assert_eq!(parse(&["--http-path", "mcp/"]).mount_path(), "/mcp");
        assert_eq!(parse(&["--http-path", "/"]).mount_path(), "");
    }

    #[test]
    fn test_neo4j_requires_url_and_password() {
        let settings = parse(&["--neo4j-url", "", "--neo4j-password", "secret"]);
        assert!(settings.neo4j().is_err());

        let settings = parse(&[
            "--neo4j-url",
            "neo4j://localhost:7687",
            "--neo4j-password",
            "secret",
            "--neo4j-max-connections",
            "0",
        ]);
        let neo4j = settings.neo4j().unwrap();
        assert_eq!(neo4j.username, "neo4j");
        assert_eq!(neo4j.max_connections, 1);
    }

    #[test]
    fn test_transport_and_store_values() {
        let settings = parse(&["--transport", "stdio", "--store", "memory"]);
        assert_eq!(settings.transport, Transport::Stdio);
        assert_eq!(settings.store, StoreKind::Memory);
    }
}
