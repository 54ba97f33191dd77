//! Gateway configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bc_04_submission::DEFAULT_MAX_EVIDENCE_BYTES;

/// Default listening port.
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Headroom above the evidence limit for the other multipart fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// API Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,

    /// Listening port
    pub port: u16,

    /// Largest accepted evidence upload
    pub max_evidence_bytes: usize,

    /// Cross-origin policy
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_HTTP_PORT,
            max_evidence_bytes: DEFAULT_MAX_EVIDENCE_BYTES,
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Loopback, ephemeral port, small upload limit.
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            max_evidence_bytes: 64 * 1024,
            cors: CorsConfig::default(),
        }
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Request body limit: evidence limit plus room for the text fields.
    pub fn body_limit(&self) -> usize {
        self.max_evidence_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

/// CORS configuration.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any.
    pub allowed_origins: Vec<String>,

    /// Preflight cache duration in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}
