//! Endpoint layer for Loopkit.
//!
//! The loop talks to a polymorphic [`traits::LanguageModelEndpoint`]
//! boundary rather than a concrete SDK type; any provider implementation
//! can satisfy it.
//!
//! # Architecture
//!
//! - [`traits::LanguageModelEndpoint`] — trait every endpoint implements
//! - [`registry`] — static provider presets + matching logic
//! - [`http_endpoint::HttpEndpoint`] — generic OpenAI-compatible HTTP client
//! - [`http_endpoint::create_endpoint`] — convenience builder from config

pub mod http_endpoint;
pub mod registry;
pub mod traits;

pub use http_endpoint::{create_endpoint, HttpEndpoint};
pub use registry::{ProviderPreset, PRESETS};
pub use traits::{LanguageModelEndpoint, RequestConfig};
