//! # BC-05 API Gateway
//!
//! HTTP surface of the registry: evidence submission plus the read-path
//! queries over the ledger and the result store.
//!
//! **Subsystem ID:** 05  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Routes
//!
//! | Method | Path | Backed by |
//! |--------|------|-----------|
//! | POST | `/api/projects` | Submission Orchestrator (multipart form) |
//! | GET | `/api/projects/user/:address` | Ledger `getUserProjects` + `getProject` |
//! | GET | `/api/projects/:id` | Ledger `getProject` + Result Store |
//! | GET | `/api/analysis/:id` | Result Store |
//! | GET | `/api/stats` | Ledger `getPlatformStats` |
//! | GET | `/api/verify/:address` | Ledger `isVerifiedOrganization` |
//! | GET | `/api/admin` | Ledger `admin` |
//! | POST | `/api/admin/verify-org` | Ledger `addVerifiedOrganization` |
//! | GET | `/health` | - |
//! | GET | `/metrics` | Prometheus registry |
//!
//! ## Status Codes
//!
//! - 400: invalid input, including oversized uploads
//! - 403: signer lacks the admin role
//! - 404: unknown project, analysis or route
//! - 500: result store failure
//! - 502: ledger failure on a read path
//! - 503: ledger not configured
//!
//! A submission never fails because of the ledger; see `bc-04-submission`.
//!
//! ## Module Structure
//!
//! ```text
//! bc-05-api-gateway/
//! ├── domain/          # ApiError, response bodies
//! ├── handlers/        # projects, registry, system
//! ├── middleware/      # CORS
//! ├── router.rs        # AppState, build_router
//! ├── service.rs       # ApiGatewayService (bind + graceful shutdown)
//! └── config.rs        # GatewayConfig
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use config::{CorsConfig, GatewayConfig, DEFAULT_HTTP_PORT};
pub use domain::{ApiError, GatewayError};
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;
