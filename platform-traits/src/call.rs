//! Call adaptation and response conversion contracts.
//!
//! The HTTP transport produces [`Call`] objects; the client builder consults
//! the platform strategy for ordered factory lists and hands each declared
//! return shape to the first factory that claims it. Earlier entries win, so
//! list order is significant.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::{CallError, ConvertError};

/// Raw HTTP response as seen by the conversion layer.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// `None` when the response carried no body at all.
    pub body: Option<Bytes>,
}

impl RawResponse {
    pub fn new(status: u16, body: Option<Bytes>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Declared shape of a service method's return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// A callback-style call object.
    Call,
    /// The extended asynchronous completion type.
    Future,
    /// The extended optional-value wrapper around the response body.
    OptionalBody,
}

/// One-shot completion callback for an enqueued call.
pub type CallCallback = Box<dyn FnOnce(Result<RawResponse, CallError>) + Send>;

/// An in-flight HTTP call whose transport internals live elsewhere.
pub trait Call: Send + Sync {
    /// Start the call, delivering its outcome to `callback` exactly once.
    fn enqueue(&self, callback: CallCallback);
}

/// Result of adapting a call to its declared return shape.
pub enum AdaptedCall {
    /// A callback-style call, possibly wrapped for executor marshalling.
    Call(Arc<dyn Call>),
    /// A completion future resolving with the call's outcome.
    Future(BoxFuture<'static, Result<RawResponse, CallError>>),
}

/// Adapts calls for one declared return shape.
pub trait CallAdapter: Send + Sync {
    fn adapt(&self, call: Arc<dyn Call>) -> AdaptedCall;
}

/// Produces a [`CallAdapter`] when the declared return shape matches.
pub trait CallAdapterFactory: Send + Sync {
    /// Stable factory name used in registry diagnostics.
    fn name(&self) -> &'static str;

    /// Return an adapter for `kind`, or `None` when this factory does not
    /// handle it.
    fn get(&self, kind: ReturnKind) -> Option<Arc<dyn CallAdapter>>;
}

/// Converts a raw response body into a dynamic value.
pub trait ResponseConverter: Send + Sync {
    fn convert(&self, response: &RawResponse) -> Result<Value, ConvertError>;
}

/// Produces a [`ResponseConverter`] when the declared return shape matches.
pub trait ConverterFactory: Send + Sync {
    /// Stable factory name used in registry diagnostics.
    fn name(&self) -> &'static str;

    fn response_converter(&self, kind: ReturnKind) -> Option<Arc<dyn ResponseConverter>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, None).is_success());
        assert!(RawResponse::new(204, None).is_success());
        assert!(!RawResponse::new(301, None).is_success());
        assert!(!RawResponse::new(404, None).is_success());
    }
}
