//! Shared LLM access for the backend.
//!
//! - [`config`]: provider/model configuration and env-driven defaults
//! - [`services`]: thin HTTP clients for OpenAI and Ollama
//! - [`service_profiles`]: generation + embedding profiles with cached clients
//! - [`generator`]: the [`generator::TextGenerator`] seam used by quiz generation
//! - [`health_service`]: resilient provider probes for `/health`
//! - [`telemetry`]: crate-scoped tracing layer

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
