//! Client for the order submission and reporting service.
//!
//! The service speaks loosely-structured XML over HTTP: per-order-type URL
//! conventions, ad-hoc per-node failures, and a magic-value credential
//! probe. This crate absorbs those quirks behind a small typed surface:
//! [`ApiClient`] dispatches requests through an injected [`Transport`] and
//! classifies every outcome into the result types in [`results`].

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod interpret;
pub mod mock;
pub mod results;
pub mod transport;

pub use client::ApiClient;
pub use error::{ClientError, TransportError};
pub use ordercast_core::types::{OrderType, ReportReturnType};
pub use results::{
    OrderReport, OrderResponse, RequestResultType, TemplateResponse, TransactionReport,
};
pub use transport::HttpTransport;

/// One HTTP round trip. Implementations hold no per-call state, so a
/// single instance can be shared across concurrent operations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with an XML content type and return the
    /// response body.
    async fn upload(&self, url: &str, body: &str) -> Result<String, TransportError>;

    /// GET `url` and return the response body.
    async fn download(&self, url: &str) -> Result<String, TransportError>;
}
