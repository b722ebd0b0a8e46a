//! Outbound side: talking to the Dolibarr REST API.
//!
//! - `endpoint.rs` - base URL normalization and credential checks
//! - `request.rs` - the request descriptor built for each tool call
//! - `client.rs` - the async transport that executes descriptors

mod client;
mod endpoint;
mod request;

pub use client::{
    DEFAULT_TIMEOUT_SECS, RawResponse, ReqwestTransport, Transport, TransportError,
    TransportErrorKind,
};
pub use endpoint::{
    API_ROOT, ConfigError, EndpointConfig, MIN_API_KEY_LENGTH, normalize_base_url,
};
pub use request::{API_KEY_HEADER, HttpMethod, RequestDescriptor, ResponseShape, USER_AGENT};
