//! textlens server - HTTP REST API for text analysis and plagiarism detection
//!
//! This crate exposes the textlens pipeline over HTTP:
//!
//! - **Word frequencies**: token counts and relative frequencies
//! - **Shingles**: `k`-token window statistics, optionally with the raw list
//! - **Plagiarism detection**: sampled exact-phrase web lookups grouped by source
//! - **File uploads**: the same analyses over `.txt`/`.log` uploads
//! - **Health & Metrics**: liveness probe and Prometheus-compatible metrics
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: `.env`, `server.*` file and `TEXTLENS_SERVER__*` variables
//! - **Error Handling**: Every failure answers `{ "error": "message" }`
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /text/analyze` - Word frequencies for `{ text }`
//! - `POST /text/shingles` - Shingle statistics for `{ text, k, includeShingles }`
//! - `POST /plagiarism/detect` - Plagiarism score for `{ text, shingleSize, sampleStep }`
//! - `POST /file/analyze` - Word frequencies for uploaded files
//! - `POST /file/shingles` - Shingle statistics for uploaded files
//! - `POST /plagiarism/detect/file` - Plagiarism score for uploaded files

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{SearchProvider, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
